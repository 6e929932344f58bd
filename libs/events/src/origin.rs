//! Origin composition.
//!
//! An origin identifies where an event came from, e.g.
//! `MWS/plugins/MyPlugin/inst1/Jobs/Submit`.

/// Delimiter between origin segments.
pub const ORIGIN_DELIMITER: &str = "/";

/// Root of every plugin origin.
pub const ORIGIN_ROOT: &str = "MWS/plugins";

/// Builds the origin for a plugin instance, with an optional suffix.
///
/// A single leading delimiter on the suffix is stripped.
pub fn build_origin(plugin_type: &str, plugin_id: &str, origin_suffix: Option<&str>) -> String {
    let base = [ORIGIN_ROOT, plugin_type, plugin_id].join(ORIGIN_DELIMITER);
    match origin_suffix {
        Some(suffix) => {
            let suffix = suffix.strip_prefix(ORIGIN_DELIMITER).unwrap_or(suffix);
            format!("{}{}{}", base, ORIGIN_DELIMITER, suffix)
        }
        None => base,
    }
}
