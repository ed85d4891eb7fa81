use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::error::AuthError;
use super::record::AuthenticationRecord;

const RECORD_FILE_NAME: &str = "credentials.json";

/// Single-slot persistence for an [`AuthenticationRecord`].
///
/// Implementations hold at most one record. Writing replaces the previous
/// value entirely; the empty record denotes "never logged in".
pub trait RecordStore: Send + Sync {
    fn retrieve_record(&self) -> Result<AuthenticationRecord, AuthError>;
    fn store_record(&self, record: &AuthenticationRecord) -> Result<(), AuthError>;
    fn clear_record(&self) -> Result<(), AuthError>;

    fn has_record(&self) -> Result<bool, AuthError> {
        Ok(!self.retrieve_record()?.is_empty())
    }
}

/// Configuration for file-backed record storage.
#[derive(Debug, Clone)]
pub struct RecordStoreConfig {
    pub base_dir: PathBuf,
}

impl RecordStoreConfig {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Per-user configuration directory for `app_name`.
    pub fn for_app(app_name: &str) -> Self {
        Self::new(default_app_dir(app_name))
    }
}

/// File-backed record store holding JSON at `<base_dir>/credentials.json`.
///
/// # Example
/// ```no_run
/// use headless_auth::auth::{FileRecordStore, RecordStore, RecordStoreConfig};
///
/// let store = FileRecordStore::open(RecordStoreConfig::for_app("my-tool"))?;
/// if !store.has_record()? {
///     println!("no saved session at {}", store.path().display());
/// }
/// # Ok::<(), headless_auth::auth::AuthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    /// Open the store, creating the directory and an empty record file when
    /// absent. Existing content is left untouched.
    pub fn open(config: RecordStoreConfig) -> Result<Self, AuthError> {
        fs::create_dir_all(&config.base_dir)?;
        let path = config.base_dir.join(RECORD_FILE_NAME);

        let mut options = fs::OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        options.mode(0o600);
        options.open(&path)?;

        tracing::debug!(path = %path.display(), "Opened record store");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for FileRecordStore {
    fn retrieve_record(&self) -> Result<AuthenticationRecord, AuthError> {
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(AuthenticationRecord::empty());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn store_record(&self, record: &AuthenticationRecord) -> Result<(), AuthError> {
        let serialized = if record.is_empty() {
            Vec::new()
        } else {
            serde_json::to_vec_pretty(record)?
        };
        atomic_write(&self.path, &serialized)?;
        tracing::debug!(
            path = %self.path.display(),
            empty = record.is_empty(),
            "Stored authentication record"
        );
        Ok(())
    }

    fn clear_record(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn default_app_dir(app_name: &str) -> PathBuf {
    if let Some(dirs) = directories::ProjectDirs::from("", "", app_name) {
        return dirs.config_dir().to_path_buf();
    }
    let hidden = format!(".{app_name}");
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(&hidden))
        .unwrap_or_else(|| PathBuf::from(hidden))
}

fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| RECORD_FILE_NAME.to_string());
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let temp_path = path.with_file_name(format!(
        ".{file_name}.tmp-{}-{nonce}",
        std::process::id()
    ));

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let write_result = (|| -> std::io::Result<()> {
        let mut temp_file = options.open(&temp_path)?;
        temp_file.write_all(data)?;
        temp_file.sync_all()?;
        Ok(())
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    #[cfg(unix)]
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;

    Ok(())
}
