use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Countdown length used when the preference file does not set one.
pub const DEFAULT_DURATION_SECS: u32 = 60;

/// The flat key-value preference file.
///
/// Owned and written by the surrounding settings app; this crate only ever
/// reads it. Absent keys fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefs {
    /// Application identifiers to block.
    pub blocked_packages: HashSet<String>,
    /// Reminder tasks shown on the overlay, in order.
    pub tasks: Vec<String>,
    /// Seconds the user must wait before the overlay unlocks.
    pub duration_secs: u32,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            blocked_packages: HashSet::new(),
            tasks: Vec::new(),
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_safe() {
        let prefs = Prefs::default();
        assert!(prefs.blocked_packages.is_empty());
        assert!(prefs.tasks.is_empty());
        assert_eq!(prefs.duration_secs, DEFAULT_DURATION_SECS);
    }

    #[test]
    fn absent_keys_fall_back_to_defaults() {
        let prefs: Prefs = serde_json::from_str(r#"{"blocked_packages": ["com.example.game"]}"#)
            .expect("partial file should parse");
        assert!(prefs.blocked_packages.contains("com.example.game"));
        assert!(prefs.tasks.is_empty());
        assert_eq!(prefs.duration_secs, DEFAULT_DURATION_SECS);
    }
}
