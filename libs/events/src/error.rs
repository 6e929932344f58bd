//! Error types for catalog validation.

use thiserror::Error;

/// Errors raised while validating an event catalog or a notification condition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The catalog name is empty.
    #[error("catalog name cannot be empty")]
    EmptyCatalogName,

    /// The catalog declares no events.
    #[error("catalog '{catalog}' declares no events")]
    EmptyCatalog { catalog: String },

    /// A definition has an empty name.
    #[error("catalog '{catalog}' has an unnamed event at position {index}")]
    EmptyDefinitionName { catalog: String, index: usize },

    /// Two definitions share a name (compared case-insensitively).
    #[error("catalog '{catalog}' declares '{name}' more than once (conflicts with '{existing}')")]
    DuplicateName {
        catalog: String,
        name: String,
        existing: String,
    },

    /// A static override is present but is not a plain string.
    #[error("event '{definition}' has a {field} override that is not a plain string: {found}")]
    UnresolvableOverride {
        definition: String,
        field: &'static str,
        found: String,
    },

    /// The catalog holds more events than the local code space allows.
    #[error("catalog '{catalog}' declares {count} events, maximum is {max}")]
    TooManyDefinitions {
        catalog: String,
        count: usize,
        max: usize,
    },

    /// The internal escalation level is not allowed for notification conditions.
    #[error("escalation level INTERNAL is not allowed for notification conditions")]
    InternalEscalation,
}

impl ValidationError {
    /// Returns true if this error is a duplicate definition name.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ValidationError::DuplicateName { .. })
    }
}

/// Errors that can occur when loading a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid TOML or does not match the catalog schema.
    #[error("invalid catalog document: {0}")]
    Parse(#[from] toml::de::Error),

    /// A severity or escalation value could not be parsed.
    #[error("event '{definition}': {message}")]
    InvalidLevel { definition: String, message: String },

    /// The catalog failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
