//! Identifier derivation for catalog entries.
//!
//! All functions are pure. Inputs are validated when the registry is built.

use crate::origin::ORIGIN_DELIMITER;
use crate::registry::EventDefinition;

const MESSAGE_SEPARATOR: &str = ".";
const MESSAGE_CODE_SUFFIX: &str = "message";
const COMMENT_CODE_SUFFIX: &str = "comment";

/// The i18n code of the message describing an event: `{catalog}.{name}.message`.
pub fn message_code(catalog: &str, def: &EventDefinition) -> String {
    [catalog, def.name(), MESSAGE_CODE_SUFFIX].join(MESSAGE_SEPARATOR)
}

/// The i18n code of the dictionary comment for an event: `{catalog}.{name}.comment`.
pub fn comment_code(catalog: &str, def: &EventDefinition) -> String {
    [catalog, def.name(), COMMENT_CODE_SUFFIX].join(MESSAGE_SEPARATOR)
}

/// The event type, optionally prefixed: `"Node Modify"` or just `"Modify"`.
pub fn event_type(def: &EventDefinition) -> String {
    match def.type_prefix() {
        Some(prefix) => format!("{} {}", prefix, def.name()),
        None => def.name().to_string(),
    }
}

/// The origin suffix: the override if set, otherwise `{catalog}/{name}`.
pub fn origin_suffix(catalog: &str, def: &EventDefinition) -> String {
    match def.origin_suffix_override() {
        Some(suffix) => suffix.to_string(),
        None => format!("{}{}{}", catalog, ORIGIN_DELIMITER, def.name()),
    }
}
