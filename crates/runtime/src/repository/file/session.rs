//! File-based SessionRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use battle_core::{BattleConfig, BattleSession, SessionKey};

use crate::repository::{RepositoryError, Result, SessionRecord, SessionRepository};

const EXTENSION: &str = "json";

/// File-based implementation of SessionRepository.
///
/// # File Format
///
/// One pretty-printed JSON [`SessionRecord`] per key, stored as
/// `{encoded key}.json`. Key bytes outside `[A-Za-z0-9_-]` are written as
/// `~xx` hex pairs so any chat channel id maps to a safe, reversible file
/// name. Writes go to a temp file first and are renamed into place.
pub struct FileSessionRepository {
    base_dir: PathBuf,
    /// Rules records are validated against; unset means the defaults.
    config: OnceLock<BattleConfig>,
}

impl FileSessionRepository {
    /// Create a new file-based session repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self {
            base_dir,
            config: OnceLock::new(),
        })
    }

    /// Validate loaded records against `config` instead of the defaults.
    ///
    /// An explicit config takes precedence over the one the runtime hands in
    /// through [`SessionRepository::adopt_config`].
    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = OnceLock::from(config);
        self
    }

    /// Platform data directory for persisted sessions.
    ///
    /// - Linux: `~/.local/share/battle/sessions`
    /// - macOS: `~/Library/Application Support/battle/sessions`
    /// - Fallback: `./save_data/sessions`
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "battle")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./save_data"))
            .join("sessions")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn session_path(&self, key: &SessionKey) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", encode_key(key.as_str()), EXTENSION))
    }

    fn read_record(&self, path: &Path) -> Result<BattleSession> {
        let bytes = fs::read(path).map_err(RepositoryError::Io)?;
        let record: SessionRecord = serde_json::from_slice(&bytes).map_err(|e| {
            RepositoryError::CorruptedData(format!("{}: {}", path.display(), e))
        })?;
        match self.config.get() {
            Some(config) => record.into_session(config),
            None => record.into_session(&BattleConfig::default()),
        }
    }
}

impl SessionRepository for FileSessionRepository {
    fn adopt_config(&self, config: &BattleConfig) {
        // keeps an explicit `with_config`
        let _ = self.config.set(config.clone());
    }

    fn save(&self, session: &BattleSession) -> Result<()> {
        let path = self.session_path(&session.key);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(&SessionRecord::new(session.clone()))
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            target: "runtime::repository",
            key = %session.key,
            round = session.round,
            "saved session to {}",
            path.display()
        );
        Ok(())
    }

    fn load(&self, key: &SessionKey) -> Result<Option<BattleSession>> {
        let path = self.session_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let session = self.read_record(&path)?;
        if &session.key != key {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds session {}",
                path.display(),
                session.key
            )));
        }
        Ok(Some(session))
    }

    fn delete(&self, key: &SessionKey) -> Result<()> {
        let path = self.session_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!(target: "runtime::repository", key = %key, "deleted session");
        }
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<SessionKey>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)? {
            let path = entry.map_err(RepositoryError::Io)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(key) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(decode_key)
            else {
                tracing::warn!(
                    target: "runtime::repository",
                    "skipping unrecognized file {}",
                    path.display()
                );
                continue;
            };
            keys.push(SessionKey::new(key));
        }
        keys.sort();
        Ok(keys)
    }

    fn exists(&self, key: &SessionKey) -> Result<bool> {
        Ok(self.session_path(key).exists())
    }
}

fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("~{:02x}", byte));
        }
    }
    encoded
}

fn decode_key(encoded: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(encoded.len());
    let mut chars = encoded.bytes();
    while let Some(byte) = chars.next() {
        if byte == b'~' {
            let hi = chars.next()?;
            let lo = chars.next()?;
            let pair = [hi, lo];
            let hex = std::str::from_utf8(&pair).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
        } else {
            bytes.push(byte);
        }
    }
    String::from_utf8(bytes).ok()
}
