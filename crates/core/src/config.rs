//! Runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into services. Request
//! handlers never read environment variables.

use crate::constants::{DEFAULT_DATABASE_NAME, DEFAULT_DATA_DIR, DEFAULT_PORT};
use crate::store::{DocumentStore, FileStore, MemoryStore};
use crate::validation::validate_database_name;
use crate::{InviteError, InviteResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

pub const ENV_PORT: &str = "PORT";
pub const ENV_STORE: &str = "INVITE_STORE";
pub const ENV_DATA_DIR: &str = "INVITE_DATA_DIR";
pub const ENV_DATABASE_NAME: &str = "DATABASE_NAME";
pub const ENV_SHEET_URL: &str = "GOOGLE_APPS_SCRIPT_URL";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    File,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = InviteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StoreBackend::File),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(InviteError::Config(format!(
                "{ENV_STORE} must be 'file' or 'memory', got '{other}'"
            ))),
        }
    }
}

/// Configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    port: u16,
    store_backend: StoreBackend,
    data_dir: PathBuf,
    database_name: String,
    sheet_url: Option<String>,
    data_dir_set: bool,
    database_name_set: bool,
}

impl AppConfig {
    /// Create a new `AppConfig`.
    ///
    /// # Errors
    ///
    /// Returns `InviteError::Config` if the database name is unsafe for use as a directory.
    pub fn new(
        port: u16,
        store_backend: StoreBackend,
        data_dir: PathBuf,
        database_name: String,
        sheet_url: Option<String>,
    ) -> InviteResult<Self> {
        validate_database_name(&database_name)
            .map_err(|e| InviteError::Config(e.to_string()))?;

        Ok(Self {
            port,
            store_backend,
            data_dir,
            database_name,
            sheet_url: sheet_url.filter(|u| !u.trim().is_empty()),
            data_dir_set: false,
            database_name_set: false,
        })
    }

    /// Resolve configuration from a variable lookup (normally `std::env::var`).
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `InviteError::Config` for an unparsable port, an unknown store backend or an
    /// invalid database name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> InviteResult<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = get(ENV_PORT)
            .map(|p| {
                p.parse::<u16>()
                    .map_err(|e| InviteError::Config(format!("invalid {ENV_PORT} '{p}': {e}")))
            })
            .transpose()?
            .unwrap_or(DEFAULT_PORT);
        let store_backend = get(ENV_STORE)
            .map(|s| s.parse::<StoreBackend>())
            .transpose()?
            .unwrap_or(StoreBackend::File);
        let data_dir_value = get(ENV_DATA_DIR);
        let database_value = get(ENV_DATABASE_NAME);

        let mut cfg = Self::new(
            port,
            store_backend,
            data_dir_value
                .clone()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            database_value
                .clone()
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            get(ENV_SHEET_URL),
        )?;
        cfg.data_dir_set = data_dir_value.is_some();
        cfg.database_name_set = database_value.is_some();

        Ok(cfg)
    }

    pub fn from_env() -> InviteResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn store_backend(&self) -> StoreBackend {
        self.store_backend
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn sheet_url(&self) -> Option<&str> {
        self.sheet_url.as_deref()
    }

    pub fn data_dir_set(&self) -> bool {
        self.data_dir_set
    }

    pub fn database_name_set(&self) -> bool {
        self.database_name_set
    }

    /// Open the configured document store.
    ///
    /// # Errors
    ///
    /// Returns `InviteError::Store` if the file backend cannot create its directory.
    pub fn open_store(&self) -> InviteResult<Arc<dyn DocumentStore>> {
        let store: Arc<dyn DocumentStore> = match self.store_backend {
            StoreBackend::File => Arc::new(FileStore::open(&self.data_dir, &self.database_name)?),
            StoreBackend::Memory => Arc::new(MemoryStore::with_database(&self.database_name)),
        };
        Ok(store)
    }
}
