//! Record filtering by level and topic
//!
//! Pure functions of the configuration and the candidate record; no error
//! conditions.

use super::config::{LoggerConfig, TOPIC_WILDCARDS};

/// Decide whether a record at `level` with `topic` should be emitted.
#[must_use]
pub fn should_emit(config: &LoggerConfig, level: u8, topic: &str) -> bool {
    level <= config.max_level && topic_allowed(config, topic)
}

/// Topic allowance: everything passes when topic filtering is off, the
/// whitelist is empty, or the whitelist carries a wildcard token.
#[must_use]
pub fn topic_allowed(config: &LoggerConfig, topic: &str) -> bool {
    if !config.topics || config.topic_list.is_empty() {
        return true;
    }
    config
        .topic_list
        .iter()
        .any(|entry| entry == topic || TOPIC_WILDCARDS.contains(&entry.as_str()))
}
