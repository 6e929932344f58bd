//! # mws-events
//!
//! Event catalogs and record types for MWS plugins.
//!
//! ## Design Principles
//!
//! - A catalog is built once into an immutable [`Registry`] and passed
//!   explicitly to whoever emits events
//! - Identifiers (message codes, event types, origins) are derived by pure
//!   functions from the registered definitions
//! - Event codes are declaration positions; publish [`Registry::codes`] and
//!   run [`Registry::check_codes`] before releasing an edited catalog
//! - Records are immutable and serialize to flat, stable wire shapes
//!
//! ## Identifiers
//!
//! For catalog `Jobs` and event `Submit`:
//! - message code: `Jobs.Submit.message`
//! - comment code: `Jobs.Submit.comment`
//! - origin suffix: `Jobs/Submit`
//! - origin: `MWS/plugins/{plugin type}/{plugin id}/Jobs/Submit`

mod catalog;
mod code;
pub mod derive;
mod error;
mod origin;
mod record;
mod registry;
mod types;

pub use catalog::*;
pub use code::*;
pub use error::{CatalogError, ValidationError};
pub use origin::*;
pub use record::*;
pub use registry::*;
pub use types::*;
