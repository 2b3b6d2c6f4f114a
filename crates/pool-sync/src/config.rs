use anyhow::{Context, Result};
use pool_parts::{BaseTable, ComponentClass};
use pool_search::{DEFAULT_ENDPOINT, SearchQuery};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Looked up in the pool root when no `--config` is given.
pub const CONFIG_FILE: &str = "pool-sync.toml";

/// Sync settings. Every field is optional in the file.
///
/// # Example
/// ```toml
/// endpoint = "https://factory.macrofab.com/part/search"
/// classes = ["resistor"]
///
/// [manufacturer_editable]
/// resistor = false
///
/// [base.resistor]
/// "0201" = "5b2e8f1a-0000-4000-8000-000000000201"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    pub endpoint: String,
    pub query: String,
    pub house: String,
    pub limit: String,
    pub timeout_secs: u64,
    pub classes: Vec<ComponentClass>,
    pub manufacturer_editable: ClassFlags,
    /// Package overrides merged over the built-in base table.
    pub base: BaseOverrides,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            query: String::new(),
            house: "1".to_string(),
            limit: "1000".to_string(),
            timeout_secs: 60,
            classes: ComponentClass::ALL.to_vec(),
            manufacturer_editable: ClassFlags::default(),
            base: BaseOverrides::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassFlags {
    pub resistor: bool,
    pub capacitor: bool,
}

impl Default for ClassFlags {
    fn default() -> Self {
        Self {
            resistor: true,
            capacitor: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BaseOverrides {
    pub resistor: BTreeMap<String, String>,
    pub capacitor: BTreeMap<String, String>,
}

impl SyncConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse sync config: {e}"))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Read `explicit` if given, else `<root>/pool-sync.toml` if present,
    /// else defaults.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let path = root.join(CONFIG_FILE);
        if path.is_file() {
            log::debug!("Using config {}", path.display());
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Classes to sync, deduplicated, resistors first.
    pub fn classes(&self) -> Vec<ComponentClass> {
        let mut classes = self.classes.clone();
        classes.sort();
        classes.dedup();
        classes
    }

    pub fn manufacturer_editable(&self, class: ComponentClass) -> bool {
        match class {
            ComponentClass::Resistor => self.manufacturer_editable.resistor,
            ComponentClass::Capacitor => self.manufacturer_editable.capacitor,
        }
    }

    pub fn base_table(&self) -> BaseTable {
        let mut table = BaseTable::builtin();
        table.extend(ComponentClass::Resistor, self.base.resistor.clone());
        table.extend(ComponentClass::Capacitor, self.base.capacitor.clone());
        table
    }

    pub fn search_query(&self, class: ComponentClass) -> SearchQuery {
        SearchQuery {
            query: self.query.clone(),
            house: self.house.clone(),
            class: class.api_name().to_string(),
            limit: self.limit.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = SyncConfig::parse("").unwrap();
        assert_eq!(config, SyncConfig::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.classes(), ComponentClass::ALL);
        assert!(config.manufacturer_editable(ComponentClass::Resistor));
        assert!(config.manufacturer_editable(ComponentClass::Capacitor));
        assert_eq!(
            config.search_query(ComponentClass::Resistor),
            SearchQuery::house_parts("resistor")
        );
    }

    #[test]
    fn parses_overrides() {
        let config = SyncConfig::parse(
            r#"
endpoint = "http://localhost:8080/part/search"
limit = "50"
timeout_secs = 5
classes = ["capacitor", "resistor", "capacitor"]

[manufacturer_editable]
resistor = false

[base.resistor]
"0201" = "tiny-base"
"#,
        )
        .unwrap();

        assert_eq!(config.endpoint, "http://localhost:8080/part/search");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(
            config.classes(),
            [ComponentClass::Resistor, ComponentClass::Capacitor]
        );
        assert!(!config.manufacturer_editable(ComponentClass::Resistor));
        assert!(config.manufacturer_editable(ComponentClass::Capacitor));
        assert_eq!(config.search_query(ComponentClass::Capacitor).limit, "50");

        let table = config.base_table();
        assert_eq!(
            table.lookup(ComponentClass::Resistor, "0201"),
            Some("tiny-base")
        );
        assert_eq!(
            table.lookup(ComponentClass::Resistor, "0603"),
            Some("cbeda48c-7fb0-4cfb-a4de-d9672e8cc190")
        );
        assert_eq!(table.lookup(ComponentClass::Capacitor, "0201"), None);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = SyncConfig::parse("endpoint_url = \"x\"").unwrap_err();
        assert!(err.to_string().contains("Failed to parse sync config"));
        assert!(SyncConfig::parse("classes = [\"inductor\"]").is_err());
    }

    #[test]
    fn loads_config_from_pool_root() {
        let root = tempfile::tempdir().unwrap();
        assert_eq!(
            SyncConfig::load(root.path(), None).unwrap(),
            SyncConfig::default()
        );

        std::fs::write(root.path().join(CONFIG_FILE), "house = \"0\"\n").unwrap();
        assert_eq!(SyncConfig::load(root.path(), None).unwrap().house, "0");

        let missing = root.path().join("nope.toml");
        assert!(SyncConfig::load(root.path(), Some(&missing)).is_err());
    }
}
