use std::sync::Mutex;

use serde::Serialize;

use crate::edition::Edition;
use crate::passengers::{PassengerCounts, PaxRules};
use crate::CoreResult;

/// Checks the user's passenger mix against a booking site's rules.
pub trait PassengerValidator: Send + Sync {
    fn validate(&self, rules: &PaxRules) -> CoreResult<PassengerCounts>;
}

/// Surfaces a human-readable message to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// A user-configurable option declared by a link producer.
#[derive(Debug, Clone, Serialize)]
pub struct SettingDescriptor {
    pub label: String,
    pub key: String,
    pub values: Vec<Edition>,
    pub default: String,
}

/// User settings as stored by the host.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn register_setting(&self, descriptor: SettingDescriptor);
}

/// Sends notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Keeps every notification so the caller can show them later.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, message: &str) {
        tracing::debug!("Collected notification: {}", message);
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
