//! Declarative catalog documents.
//!
//! A catalog can be written in TOML instead of code:
//!
//! ```toml
//! name = "Nodes"
//! type_prefix = "Node"
//!
//! [[events]]
//! name = "Modify"
//! severity = "info"
//! escalation = "admin"
//! ```
//!
//! Catalog-wide `type_prefix` and `origin_suffix` apply to every event that
//! does not declare its own.

use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::registry::{EventDefinitionSpec, Registry, StaticOverride};
use crate::types::{EscalationLevel, LevelParseError, Severity};

/// A parsed catalog document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    pub name: String,
    #[serde(default)]
    pub type_prefix: Option<StaticOverride>,
    #[serde(default)]
    pub origin_suffix: Option<StaticOverride>,
    #[serde(default)]
    pub events: Vec<EventEntry>,
}

/// One `[[events]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventEntry {
    pub name: String,
    pub severity: LevelValue,
    #[serde(alias = "escalation_level")]
    pub escalation: LevelValue,
    #[serde(default)]
    pub type_prefix: Option<StaticOverride>,
    #[serde(default)]
    pub origin_suffix: Option<StaticOverride>,
}

/// A level given either by name or by numeric code.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LevelValue {
    Code(u8),
    Name(String),
}

impl LevelValue {
    fn severity(&self) -> Result<Severity, LevelParseError> {
        match self {
            LevelValue::Code(code) => Severity::from_code(*code),
            LevelValue::Name(name) => name.parse(),
        }
    }

    fn escalation(&self) -> Result<EscalationLevel, LevelParseError> {
        match self {
            LevelValue::Code(code) => EscalationLevel::from_code(*code),
            LevelValue::Name(name) => name.parse(),
        }
    }
}

impl CatalogDocument {
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(contents)?)
    }

    /// Converts the document into ordered definition specs.
    pub fn specs(&self) -> Result<Vec<EventDefinitionSpec>, CatalogError> {
        self.events
            .iter()
            .map(|entry| {
                let invalid = |e: LevelParseError| CatalogError::InvalidLevel {
                    definition: entry.name.clone(),
                    message: e.to_string(),
                };
                Ok(EventDefinitionSpec {
                    name: entry.name.clone(),
                    severity: entry.severity.severity().map_err(invalid)?,
                    escalation_level: entry.escalation.escalation().map_err(invalid)?,
                    type_prefix: entry.type_prefix.clone().or_else(|| self.type_prefix.clone()),
                    origin_suffix: entry
                        .origin_suffix
                        .clone()
                        .or_else(|| self.origin_suffix.clone()),
                })
            })
            .collect()
    }

    /// Validates the document and builds its registry.
    pub fn into_registry(self) -> Result<Registry, CatalogError> {
        let specs = self.specs()?;
        Ok(Registry::build(specs, self.name)?)
    }
}

/// Parses a TOML catalog and builds its registry.
pub fn registry_from_toml_str(contents: &str) -> Result<Registry, CatalogError> {
    CatalogDocument::from_toml_str(contents)?.into_registry()
}

/// Reads a TOML catalog file and builds its registry.
pub fn registry_from_path(path: &Path) -> Result<Registry, CatalogError> {
    let contents = std::fs::read_to_string(path)?;
    registry_from_toml_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    const NODES: &str = r#"
name = "NodeEvents"
type_prefix = "Node"

[[events]]
name = "Modify"
severity = "info"
escalation = "admin"

[[events]]
name = "PowerOff"
severity = 2
escalation = "power_user"
origin_suffix = "/Power"
"#;

    #[test]
    fn test_document_builds_registry() {
        let registry = registry_from_toml_str(NODES).unwrap();
        assert_eq!(registry.catalog(), "NodeEvents");

        let modify = registry.get("Modify").unwrap();
        assert_eq!(modify.code(), 0);
        assert_eq!(modify.event_type(), "Node Modify");
        assert_eq!(modify.origin_suffix(), "NodeEvents/Modify");

        let power_off = registry.get("PowerOff").unwrap();
        assert_eq!(power_off.code(), 1);
        assert_eq!(power_off.severity(), Severity::Error);
        assert_eq!(power_off.escalation_level(), EscalationLevel::PowerUser);
        assert_eq!(power_off.event_type(), "Node PowerOff");
        assert_eq!(power_off.origin_suffix(), "/Power");
    }

    #[test]
    fn test_non_string_prefix_fails_validation() {
        let doc = r#"
name = "NodeEvents"
type_prefix = 7

[[events]]
name = "Modify"
severity = "info"
escalation = "admin"
"#;
        let err = registry_from_toml_str(doc).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::UnresolvableOverride { .. })
        ));
    }

    #[test]
    fn test_unknown_level_is_reported() {
        let doc = r#"
name = "Jobs"

[[events]]
name = "Submit"
severity = "catastrophic"
escalation = "user"
"#;
        let err = registry_from_toml_str(doc).unwrap_err();
        assert!(
            matches!(err, CatalogError::InvalidLevel { ref definition, .. } if definition == "Submit")
        );
    }

    #[test]
    fn test_document_without_events_is_rejected() {
        let err = registry_from_toml_str("name = \"Jobs\"\n").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::EmptyCatalog { .. })
        ));
    }
}
