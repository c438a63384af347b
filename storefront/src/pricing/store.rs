//! Pricing Document Store
//!
//! File-backed store for the live pricing document plus its timestamped
//! backups.
//!
//! # Layout
//!
//! | Path | Purpose |
//! |------|---------|
//! | `<dir>/pricing.json` | live document, read fresh on every request |
//! | `<dir>/backups/pricing-<utc>.json` | immutable snapshots, one per update |
//!
//! # Update sequence
//!
//! validate -> backup current live -> write replacement to a temp file ->
//! atomic rename over the live file. The rename keeps a crashed write from
//! ever leaving a torn live document; an in-process async mutex serializes
//! concurrent admin writers. If the swap fails after the backup was taken,
//! the store restores the live file from that backup (best effort, logged).

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;

use shared::models::{PricingBackupInfo, PricingDocument};

const LIVE_FILE: &str = "pricing.json";
const BACKUP_DIR: &str = "backups";
const BACKUP_PREFIX: &str = "pricing-";

/// Compiled-in seed document, written on first boot.
const DEFAULT_DOCUMENT: &str = include_str!("../../assets/default_pricing.json");

/// Top-level sections a replacement document must carry.
const REQUIRED_SECTIONS: [&str; 9] = [
    "basePrices",
    "layerPrice",
    "flavorPrices",
    "shapePrices",
    "icingTypes",
    "decorationPrices",
    "dietaryPrices",
    "templatePrices",
    "cakes",
];

/// Leaf fields that hold descriptive text instead of a price.
const DESCRIPTIVE_FIELDS: [&str; 4] = ["name", "description", "image", "category"];

/// Store errors
#[derive(Debug, Error)]
pub enum PricingStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pricing document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation failure; the message names the offending JSON path.
    #[error("{0}")]
    Invalid(String),
}

pub type StoreResult<T> = Result<T, PricingStoreError>;

/// File-backed pricing document store.
///
/// Cheap to clone; the clone shares the write lock.
#[derive(Debug, Clone)]
pub struct PricingStore {
    dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl PricingStore {
    /// Create a store rooted at `dir` (usually `work_dir/pricing`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn live_path(&self) -> PathBuf {
        self.dir.join(LIVE_FILE)
    }

    fn backup_dir(&self) -> PathBuf {
        self.dir.join(BACKUP_DIR)
    }

    /// Write the compiled-in default document if no live document exists.
    pub async fn ensure_seeded(&self) -> StoreResult<()> {
        tokio::fs::create_dir_all(self.backup_dir()).await?;
        let live = self.live_path();
        if tokio::fs::try_exists(&live).await? {
            return Ok(());
        }
        tokio::fs::write(&live, DEFAULT_DOCUMENT).await?;
        tracing::info!(path = %live.display(), "Seeded default pricing document");
        Ok(())
    }

    /// Load the live document, typed. Reads from disk on every call so an
    /// admin edit is visible to the very next quote.
    pub async fn load(&self) -> StoreResult<PricingDocument> {
        let bytes = tokio::fs::read(self.live_path()).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Load the live document verbatim (for the read endpoints, which must
    /// return exactly what the admin last wrote).
    pub async fn load_raw(&self) -> StoreResult<Value> {
        let bytes = tokio::fs::read(self.live_path()).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Validate and atomically install a full replacement document.
    ///
    /// Returns the filename of the backup taken from the previous live
    /// document. The live document is untouched on any validation failure.
    pub async fn replace(&self, replacement: &Value) -> StoreResult<String> {
        validate_document(replacement)?;

        let _guard = self.write_lock.lock().await;
        self.ensure_seeded().await?;

        let live = self.live_path();
        let current = tokio::fs::read(&live).await?;

        // 1. Snapshot the current live document.
        let backup_name = format!(
            "{BACKUP_PREFIX}{}.json",
            chrono::Utc::now().format("%Y%m%dT%H%M%S%3fZ")
        );
        let backup_path = self.backup_dir().join(&backup_name);
        tokio::fs::write(&backup_path, &current).await?;

        // 2. Write the replacement beside the live file, then swap.
        let pretty = serde_json::to_vec_pretty(replacement)?;
        let tmp_path = self.dir.join(format!(".{LIVE_FILE}.tmp"));
        let swap = async {
            tokio::fs::write(&tmp_path, &pretty).await?;
            tokio::fs::rename(&tmp_path, &live).await?;
            Ok::<(), std::io::Error>(())
        }
        .await;

        if let Err(err) = swap {
            // Best-effort restore from the backup we just made. Not retried.
            let _ = tokio::fs::remove_file(&tmp_path).await;
            match tokio::fs::write(&live, &current).await {
                Ok(()) => tracing::warn!(
                    backup = %backup_name,
                    "Pricing document swap failed, live document restored from backup"
                ),
                Err(restore_err) => tracing::error!(
                    backup = %backup_name,
                    error = %restore_err,
                    "Pricing document swap failed AND restore failed; live document may be stale"
                ),
            }
            return Err(err.into());
        }

        tracing::info!(backup = %backup_name, "Pricing document replaced");
        Ok(backup_name)
    }

    /// List backup snapshots, newest first.
    pub async fn list_backups(&self) -> StoreResult<Vec<PricingBackupInfo>> {
        let dir = self.backup_dir();
        if !tokio::fs::try_exists(&dir).await? {
            return Ok(Vec::new());
        }

        let mut entries = tokio::fs::read_dir(&dir).await?;
        let mut backups = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(BACKUP_PREFIX) || !name.ends_with(".json") {
                continue;
            }
            let meta = entry.metadata().await?;
            let timestamp = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_millis() as i64)
                .unwrap_or(0);
            backups.push(PricingBackupInfo {
                filename: name,
                timestamp,
                size: meta.len(),
            });
        }

        // Filenames embed the creation instant, so the lexicographic order
        // matches the chronological one; mtime alone has 1s granularity on
        // some filesystems.
        backups.sort_by(|a, b| b.filename.cmp(&a.filename));
        Ok(backups)
    }
}

/// Validate a replacement pricing document.
///
/// Checks (a) every required top-level section is present and (b) every
/// price leaf in the whole structure is a non-negative integer. Fields named
/// `name`/`description`/`image`/`category` are descriptive strings and may
/// hold text. The error message names the offending path.
pub fn validate_document(doc: &Value) -> StoreResult<()> {
    let obj = doc
        .as_object()
        .ok_or_else(|| PricingStoreError::Invalid("pricing document must be a JSON object".into()))?;

    for section in REQUIRED_SECTIONS {
        if !obj.contains_key(section) {
            return Err(PricingStoreError::Invalid(format!(
                "missing required section: {section}"
            )));
        }
    }

    for (key, value) in obj {
        validate_leaf(key, value)?;
    }
    Ok(())
}

fn validate_leaf(path: &str, value: &Value) -> StoreResult<()> {
    let field = path.rsplit('.').next().unwrap_or(path);
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                validate_leaf(&format!("{path}.{key}"), child)?;
            }
            Ok(())
        }
        Value::Number(n) => {
            let ok = n.as_i64().is_some_and(|v| v >= 0) || n.as_u64().is_some();
            if ok {
                Ok(())
            } else {
                Err(PricingStoreError::Invalid(format!(
                    "{path} must be a non-negative integer price (got {n})"
                )))
            }
        }
        Value::String(_) if DESCRIPTIVE_FIELDS.contains(&field) => Ok(()),
        Value::Null if DESCRIPTIVE_FIELDS.contains(&field) => Ok(()),
        other => Err(PricingStoreError::Invalid(format!(
            "{path} must be a non-negative integer price (got {})",
            type_name(other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
