//! Per-dispatcher settings.

use log::Level;

/// Settings for a `Dispatcher`.
///
/// - `label` prefixes every log record emitted by the dispatcher.
/// - `notice_level` is the level of the "registering new event key" and "no subscribers" notices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    pub label: String,
    pub notice_level: Level,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            label: "dispatcher".to_string(),
            notice_level: Level::Info,
        }
    }
}

impl DispatcherConfig {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_notice_level(mut self, level: Level) -> Self {
        self.notice_level = level;
        self
    }
}
