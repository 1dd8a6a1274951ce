use std::collections::HashMap;
use std::sync::RwLock;

use farelink_core::{SettingDescriptor, SettingsStore};

/// User settings held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    values: RwLock<HashMap<String, String>>,
    descriptors: RwLock<Vec<SettingDescriptor>>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.into(), value.into());
        }
    }

    /// Options declared so far, in registration order.
    pub fn descriptors(&self) -> Vec<SettingDescriptor> {
        self.descriptors
            .read()
            .map(|d| d.clone())
            .unwrap_or_default()
    }
}

impl SettingsStore for InMemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn register_setting(&self, descriptor: SettingDescriptor) {
        if let Ok(mut values) = self.values.write() {
            values
                .entry(descriptor.key.clone())
                .or_insert_with(|| descriptor.default.clone());
        }
        tracing::debug!(key = %descriptor.key, label = %descriptor.label, "Registered setting");
        if let Ok(mut descriptors) = self.descriptors.write() {
            descriptors.push(descriptor);
        }
    }
}
