//! Severity, escalation level, and associated object types.
//!
//! Numeric codes are part of the wire contract and never change.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// Severity
// =============================================================================

/// Severity of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Severity {
    Info,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    /// All severities in code order.
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Returns the wire code (0-3).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Severity::Info => 0x0,
            Severity::Warn => 0x1,
            Severity::Error => 0x2,
            Severity::Fatal => 0x3,
        }
    }

    /// Looks up a severity by wire code.
    pub fn from_code(code: u8) -> Result<Self, LevelParseError> {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or(LevelParseError::UnknownCode {
                kind: "severity",
                code,
            })
    }

    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.code()
    }
}

impl TryFrom<u8> for Severity {
    type Error = LevelParseError;

    fn try_from(code: u8) -> Result<Self, LevelParseError> {
        Self::from_code(code)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LevelParseError::UnknownName {
                kind: "severity",
                name: s.to_string(),
            })
    }
}

// =============================================================================
// Escalation Level
// =============================================================================

/// Audience of an event or notification condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EscalationLevel {
    /// For typical users.
    User,
    /// For power users and users.
    PowerUser,
    /// For administrators, power users, and users.
    Admin,
    /// Internal only. Not allowed for notification conditions.
    Internal,
}

impl EscalationLevel {
    /// All escalation levels in code order.
    pub const ALL: [EscalationLevel; 4] = [
        EscalationLevel::User,
        EscalationLevel::PowerUser,
        EscalationLevel::Admin,
        EscalationLevel::Internal,
    ];

    /// Returns the wire code (0-3).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            EscalationLevel::User => 0x0,
            EscalationLevel::PowerUser => 0x1,
            EscalationLevel::Admin => 0x2,
            EscalationLevel::Internal => 0x3,
        }
    }

    /// Looks up an escalation level by wire code.
    pub fn from_code(code: u8) -> Result<Self, LevelParseError> {
        Self::ALL
            .into_iter()
            .find(|l| l.code() == code)
            .ok_or(LevelParseError::UnknownCode {
                kind: "escalation level",
                code,
            })
    }

    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EscalationLevel::User => "USER",
            EscalationLevel::PowerUser => "POWER_USER",
            EscalationLevel::Admin => "ADMIN",
            EscalationLevel::Internal => "INTERNAL",
        }
    }

    /// Returns true if this level may be used for a notification condition.
    #[must_use]
    pub const fn allows_notifications(self) -> bool {
        !matches!(self, EscalationLevel::Internal)
    }
}

impl From<EscalationLevel> for u8 {
    fn from(level: EscalationLevel) -> Self {
        level.code()
    }
}

impl TryFrom<u8> for EscalationLevel {
    type Error = LevelParseError;

    fn try_from(code: u8) -> Result<Self, LevelParseError> {
        Self::from_code(code)
    }
}

impl fmt::Display for EscalationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EscalationLevel {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| LevelParseError::UnknownName {
                kind: "escalation level",
                name: s.to_string(),
            })
    }
}

/// Error parsing a severity or escalation level.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum LevelParseError {
    #[error("unknown {kind} code: {code}")]
    UnknownCode { kind: &'static str, code: u8 },

    #[error("unknown {kind}: '{name}'")]
    UnknownName { kind: &'static str, name: String },
}

// =============================================================================
// Associated Object
// =============================================================================

/// An entity correlated with an event or notification, such as Node "node1".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssociatedObject {
    /// Kind of object ("Node", "VM", "Policy", ...).
    #[serde(rename = "type")]
    pub object_type: String,
    pub id: String,
}

impl AssociatedObject {
    pub fn new(object_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            id: id.into(),
        }
    }
}

/// Builds an object from a `{type, id}` map. Missing keys become empty strings.
impl From<&BTreeMap<String, String>> for AssociatedObject {
    fn from(map: &BTreeMap<String, String>) -> Self {
        Self {
            object_type: map.get("type").cloned().unwrap_or_default(),
            id: map.get("id").cloned().unwrap_or_default(),
        }
    }
}

impl fmt::Display for AssociatedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_type, self.id)
    }
}

// =============================================================================
// Tests
// =============================================================================
