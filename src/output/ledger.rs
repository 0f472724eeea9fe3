// src/output/ledger.rs
//! When each route was last generated.
//!
//! The ledger is a JSON object from route path to generation time, kept at
//! `<output-dir>/.revalidation.json`. A route is stale once its last
//! generation is at least one revalidation interval old.

use crate::constants::REVALIDATION_LEDGER_FILE;
use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevalidationLedger {
    #[serde(default)]
    generated: BTreeMap<String, DateTime<Utc>>,
}

impl RevalidationLedger {
    pub fn location(out_dir: &Path) -> PathBuf {
        out_dir.join(REVALIDATION_LEDGER_FILE)
    }

    /// Loads the ledger of `out_dir`. A missing file is an empty ledger; an
    /// unparseable one is an error.
    pub fn load(out_dir: &Path) -> Result<Self, AppError> {
        let path = Self::location(out_dir);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No ledger at {}, starting fresh", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&text).map_err(|source| AppError::LedgerCorrupted { path, source })
    }

    pub fn save(&self, out_dir: &Path) -> Result<(), AppError> {
        fs::create_dir_all(out_dir)?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(Self::location(out_dir), json)?;
        Ok(())
    }

    pub fn last_generated(&self, route_path: &str) -> Option<DateTime<Utc>> {
        self.generated.get(route_path).copied()
    }

    /// Never generated, or generated at least `ttl` before `now`.
    pub fn is_stale(&self, route_path: &str, now: DateTime<Utc>, ttl: Duration) -> bool {
        match self.generated.get(route_path) {
            None => true,
            Some(at) => now.signed_duration_since(*at) >= ttl,
        }
    }

    pub fn record(&mut self, route_path: impl Into<String>, at: DateTime<Utc>) {
        self.generated.insert(route_path.into(), at);
    }

    /// Drops every entry not in `live` and returns the dropped route paths.
    pub fn prune<'a>(&mut self, live: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let live: std::collections::HashSet<&str> = live.into_iter().collect();
        let orphans: Vec<String> = self
            .generated
            .keys()
            .filter(|path| !live.contains(path.as_str()))
            .cloned()
            .collect();
        for path in &orphans {
            self.generated.remove(path);
        }
        orphans
    }

    pub fn len(&self) -> usize {
        self.generated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generated.is_empty()
    }
}
