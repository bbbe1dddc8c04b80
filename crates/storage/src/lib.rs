//! Sqlite-backed persistence.

use std::path::Path;

use anyhow::Context as _;
use jobpulse_core::{ApplicationType, PROFILE_KEY, ProfileRecord, Settings};
use rusqlite::{Connection, OptionalExtension as _};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("read profile file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("profile file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("profile file must contain a JSON object")]
    NotAnObject,
}

#[derive(Debug)]
pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("open sqlite db at {}", path.as_ref().display()))?;
        let storage = Self { conn };
        storage.migrate()?;
        Ok(storage)
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory sqlite db")?;
        let storage = Self { conn };
        storage.migrate()?;
        Ok(storage)
    }

    fn migrate(&self) -> anyhow::Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                output_dir TEXT NOT NULL
            );
            INSERT OR IGNORE INTO settings (id, output_dir)
            VALUES (1, '.');

            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL DEFAULT (unixepoch())
            );
            "#,
        )?;

        match self.conn.execute(
            "ALTER TABLE settings ADD COLUMN application_type TEXT NOT NULL DEFAULT 'alternance'",
            [],
        ) {
            Ok(_) => {}
            Err(err) => {
                let msg = err.to_string();
                if !msg.contains("duplicate column name") {
                    return Err(err).context("add settings.application_type column");
                }
            }
        }

        Ok(())
    }

    pub fn load_settings(&self) -> anyhow::Result<Settings> {
        let row = self
            .conn
            .query_row(
                "SELECT output_dir, application_type FROM settings WHERE id = 1",
                [],
                |row| {
                    let output_dir: String = row.get(0)?;
                    let application_type: String = row.get(1)?;
                    Ok((output_dir, application_type))
                },
            )
            .optional()?;

        let (output_dir, application_type) = match row {
            Some(value) => value,
            None => (".".to_string(), "alternance".to_string()),
        };

        let application_type = application_type
            .parse::<ApplicationType>()
            .unwrap_or(ApplicationType::Alternance);

        let mut settings = Settings {
            output_dir,
            application_type,
        };
        settings.normalize();
        Ok(settings)
    }

    pub fn save_settings(&self, settings: &Settings) -> anyhow::Result<()> {
        let mut settings = settings.clone();
        settings.normalize();

        self.conn.execute(
            "UPDATE settings SET output_dir = ?, application_type = ? WHERE id = 1",
            (&settings.output_dir, settings.application_type.as_str()),
        )?;
        Ok(())
    }

    fn get_value(&self, key: &str) -> anyhow::Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set_value(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO kv (key, value, updated_at) VALUES (?, ?, unixepoch())
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            (key, value),
        )?;
        Ok(())
    }

    pub fn has_profile(&self) -> anyhow::Result<bool> {
        Ok(self.get_value(PROFILE_KEY)?.is_some())
    }

    /// Loads the stored profile. A missing or unreadable document yields the default profile.
    pub fn load_profile(&self) -> anyhow::Result<ProfileRecord> {
        let Some(raw) = self.get_value(PROFILE_KEY)? else {
            return Ok(ProfileRecord::default());
        };
        match serde_json::from_str::<ProfileRecord>(&raw) {
            Ok(profile) => Ok(profile),
            Err(err) => {
                tracing::warn!(error = %err, "stored profile is unreadable, using defaults");
                Ok(ProfileRecord::default())
            }
        }
    }

    pub fn save_profile(&self, profile: &ProfileRecord) -> anyhow::Result<()> {
        let raw = serde_json::to_string(profile)?;
        self.set_value(PROFILE_KEY, &raw)?;
        tracing::debug!(bytes = raw.len(), "saved profile");
        Ok(())
    }

    pub fn clear_profile(&self) -> anyhow::Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?", [PROFILE_KEY])?;
        Ok(())
    }

    /// Parses `path` and stores it as the new profile. On error nothing is written.
    pub fn import_profile(&self, path: impl AsRef<Path>) -> anyhow::Result<ProfileRecord> {
        let profile = read_profile_file(path)?;
        self.save_profile(&profile)?;
        Ok(profile)
    }

    pub fn export_profile(&self, path: impl AsRef<Path>) -> anyhow::Result<ProfileRecord> {
        let profile = self.load_profile()?;
        write_profile_file(path, &profile)?;
        Ok(profile)
    }
}

pub fn profile_to_json(profile: &ProfileRecord) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(profile)?)
}

/// Parses an exported profile document. Absent fields take their defaults.
pub fn profile_from_json(raw: &str) -> Result<ProfileRecord, ImportError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err(ImportError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

pub fn read_profile_file(path: impl AsRef<Path>) -> Result<ProfileRecord, ImportError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.display().to_string(),
        source,
    })?;
    profile_from_json(&raw)
}

pub fn write_profile_file(path: impl AsRef<Path>, profile: &ProfileRecord) -> anyhow::Result<()> {
    let path = path.as_ref();
    let raw = profile_to_json(profile)?;
    std::fs::write(path, raw).with_context(|| format!("write profile to {}", path.display()))?;
    tracing::debug!(path = %path.display(), "exported profile");
    Ok(())
}
