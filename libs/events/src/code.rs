//! Full event code composition.
//!
//! Catalog codes are local to one plugin component. The code handed to the
//! store packs severity, escalation, component, and local code into 32 bits:
//!
//! ```text
//!  31  30 29  28 27        20 19                  0
//! [severity][escalation][component][   local code    ]
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{EscalationLevel, Severity};

/// Component code of plugins that do not declare one.
pub const UNKNOWN_PLUGIN_COMPONENT: u8 = 0xFF;

/// Number of bits available for the local event code.
pub const LOCAL_CODE_BITS: u32 = 20;

/// Largest local event code that fits the layout.
pub const MAX_LOCAL_CODE: u32 = (1 << LOCAL_CODE_BITS) - 1;

const COMPONENT_SHIFT: u32 = LOCAL_CODE_BITS;
const ESCALATION_SHIFT: u32 = 28;
const SEVERITY_SHIFT: u32 = 30;

/// A composed wire event code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventCode(u32);

impl EventCode {
    /// Composes a wire code. Returns `None` if `local` exceeds [`MAX_LOCAL_CODE`].
    #[must_use]
    pub fn compose(
        severity: Severity,
        escalation: EscalationLevel,
        component: u8,
        local: u32,
    ) -> Option<Self> {
        if local > MAX_LOCAL_CODE {
            return None;
        }
        Some(Self(
            u32::from(severity.code()) << SEVERITY_SHIFT
                | u32::from(escalation.code()) << ESCALATION_SHIFT
                | u32::from(component) << COMPONENT_SHIFT
                | local,
        ))
    }

    /// Wraps a raw wire value.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The same 32 bits read as a signed integer, for consumers without an
    /// unsigned 32-bit type. ERROR and FATAL codes are negative.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0 as i32
    }

    pub fn severity(self) -> Severity {
        match self.0 >> SEVERITY_SHIFT {
            0 => Severity::Info,
            1 => Severity::Warn,
            2 => Severity::Error,
            _ => Severity::Fatal,
        }
    }

    pub fn escalation(self) -> EscalationLevel {
        match (self.0 >> ESCALATION_SHIFT) & 0b11 {
            0 => EscalationLevel::User,
            1 => EscalationLevel::PowerUser,
            2 => EscalationLevel::Admin,
            _ => EscalationLevel::Internal,
        }
    }

    #[must_use]
    pub const fn component(self) -> u8 {
        ((self.0 >> COMPONENT_SHIFT) & 0xFF) as u8
    }

    #[must_use]
    pub const fn local(self) -> u32 {
        self.0 & MAX_LOCAL_CODE
    }
}

impl std::fmt::Display for EventCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_compose_layout() {
        let code = EventCode::compose(Severity::Error, EscalationLevel::Admin, 0x12, 5).unwrap();
        assert_eq!(code.value(), 0xA120_0005);
        assert_eq!(code.to_string(), "0xA1200005");
    }

    #[test]
    fn test_signed_view_keeps_bits() {
        let fatal = EventCode::compose(Severity::Fatal, EscalationLevel::Internal, 0xFF, 1).unwrap();
        assert!(fatal.value() >= 1 << 31);
        assert!(fatal.as_i32() < 0);
        assert_eq!(EventCode::from_raw(fatal.as_i32() as u32), fatal);

        let info = EventCode::compose(Severity::Info, EscalationLevel::User, 0xFF, 1).unwrap();
        assert_eq!(info.as_i32() as u32, info.value());
        assert!(info.as_i32() >= 0);
    }

    #[test]
    fn test_unknown_component_info_user() {
        let code =
            EventCode::compose(Severity::Info, EscalationLevel::User, UNKNOWN_PLUGIN_COMPONENT, 1)
                .unwrap();
        assert_eq!(code.value(), 0x0FF0_0001);
    }

    #[test]
    fn test_local_code_out_of_range() {
        assert!(EventCode::compose(
            Severity::Info,
            EscalationLevel::User,
            0,
            MAX_LOCAL_CODE + 1
        )
        .is_none());
    }

    proptest! {
        #[test]
        fn compose_then_decompose(
            sev in 0u8..4,
            esc in 0u8..4,
            component in any::<u8>(),
            local in 0u32..=MAX_LOCAL_CODE,
        ) {
            let severity = Severity::from_code(sev).unwrap();
            let escalation = EscalationLevel::from_code(esc).unwrap();
            let code = EventCode::compose(severity, escalation, component, local).unwrap();
            prop_assert_eq!(code.severity(), severity);
            prop_assert_eq!(code.escalation(), escalation);
            prop_assert_eq!(code.component(), component);
            prop_assert_eq!(code.local(), local);
        }
    }
}
