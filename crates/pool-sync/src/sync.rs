//! Fetch listings per class and rewrite the matching `parts/<class>/` directory.

use anyhow::{Context, Result};
use pool_parts::listing::label;
use pool_parts::{BaseTable, ComponentClass, PartContext, generate, normalize_keys};
use pool_search::SearchClient;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::SyncConfig;

/// Where listings come from.
pub trait PartSource {
    /// Raw decoded response for one class.
    fn search(&self, class: ComponentClass) -> Result<Value>;
}

/// The parts-search API.
pub struct HttpSource {
    client: SearchClient,
    config: SyncConfig,
}

impl HttpSource {
    pub fn new(config: &SyncConfig) -> Result<Self> {
        Ok(Self {
            client: SearchClient::new(config.endpoint.clone(), config.timeout())?,
            config: config.clone(),
        })
    }
}

impl PartSource for HttpSource {
    fn search(&self, class: ComponentClass) -> Result<Value> {
        self.client.search(&self.config.search_query(class))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub class: ComponentClass,
    pub written: usize,
    pub skipped: usize,
}

pub struct Syncer<'a, S: PartSource> {
    source: &'a S,
    config: &'a SyncConfig,
    bases: BaseTable,
    parts_dir: PathBuf,
}

impl<'a, S: PartSource> Syncer<'a, S> {
    pub fn new(source: &'a S, config: &'a SyncConfig, root: &Path) -> Self {
        Self {
            source,
            config,
            bases: config.base_table(),
            parts_dir: root.join("parts"),
        }
    }

    pub fn class_dir(&self, class: ComponentClass) -> PathBuf {
        self.parts_dir.join(class.dir_name())
    }

    /// Sync every configured class in order. Stops at the first fatal error.
    pub fn run(&self) -> Result<Vec<SyncReport>> {
        self.config
            .classes()
            .into_iter()
            .map(|class| self.sync_class(class))
            .collect()
    }

    /// Replace `parts/<class>/` with freshly generated part files.
    ///
    /// The listing is fetched and decoded before the directory is touched.
    /// Once the old directory is gone there is no rollback: a failure while
    /// writing leaves it partially populated until the next run.
    pub fn sync_class(&self, class: ComponentClass) -> Result<SyncReport> {
        let body = self
            .source
            .search(class)
            .with_context(|| format!("Failed to fetch {class} listings"))?;
        let records = into_records(normalize_keys(body))
            .with_context(|| format!("Unexpected {class} listing response"))?;

        let dir = self.class_dir(class);
        replace_dir(&dir)?;

        let ctx = PartContext::new(&self.bases)
            .with_manufacturer_editable(self.config.manufacturer_editable(class));
        let mut report = SyncReport {
            class,
            written: 0,
            skipped: 0,
        };
        let mut seen = HashSet::new();

        for record in &records {
            let part = match generate(class, record, &ctx) {
                Ok(part) => part,
                Err(reason) => {
                    log::warn!("part '{}' is not supported: {}", label(record), reason);
                    report.skipped += 1;
                    continue;
                }
            };

            let mpn = part.mpn.1.as_str();
            if !seen.insert(mpn.to_string()) {
                log::warn!("part '{mpn}' is listed more than once, keeping the last listing");
            } else {
                report.written += 1;
            }

            let path = dir.join(format!("{mpn}.json"));
            let contents = part
                .to_pretty_json()
                .with_context(|| format!("Failed to serialize part '{mpn}'"))?;
            fs::write(&path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::debug!("Wrote {}", path.display());
        }

        log::info!(
            "{class}: wrote {} parts, skipped {} listings",
            report.written,
            report.skipped
        );
        Ok(report)
    }
}

/// Accepts either an array of records or an object keyed by record.
fn into_records(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Array(records) => Ok(records),
        Value::Object(map) => Ok(map.into_iter().map(|(_, record)| record).collect()),
        other => anyhow::bail!("expected an array of listings, got {}", json_kind(&other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Delete `dir` and everything in it, then recreate it empty.
fn replace_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to remove {}", dir.display()));
        }
    }
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_bodies_yield_their_values() {
        let records = into_records(json!({"a": {"mpn": "A"}, "b": {"mpn": "B"}})).unwrap();
        assert_eq!(records, vec![json!({"mpn": "A"}), json!({"mpn": "B"})]);
    }

    #[test]
    fn scalar_bodies_are_rejected() {
        let err = into_records(json!("maintenance")).unwrap_err();
        assert_eq!(err.to_string(), "expected an array of listings, got a string");
    }

    #[test]
    fn replace_dir_creates_missing_parents() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("parts").join("resistor");
        replace_dir(&dir).unwrap();
        assert!(dir.is_dir());

        fs::write(dir.join("stale.json"), "{}").unwrap();
        replace_dir(&dir).unwrap();
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }
}
