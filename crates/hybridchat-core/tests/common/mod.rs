#![allow(dead_code)]

use parking_lot::Mutex;
use std::sync::Arc;

use hybridchat_core::{
    ui_channel, ChatHistory, ContentView, CoreError, Database, DeviceInfoProvider, DeviceProfile,
    InMemoryPermissions, KeyValueStore, NativeBridge, Notifier, PermissionGate, Preferences,
    Result, StorageError, ToastDuration, UiLoop, CHAT_HISTORY_NAMESPACE,
};

#[derive(Default)]
pub struct RecordingNotifier {
    pub shown: Mutex<Vec<(String, ToastDuration)>>,
}

impl RecordingNotifier {
    pub fn texts(&self) -> Vec<String> {
        self.shown.lock().iter().map(|(text, _)| text.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, text: &str, duration: ToastDuration) {
        self.shown.lock().push((text.to_string(), duration));
    }
}

#[derive(Default)]
pub struct RecordingView {
    pub loaded: Mutex<Vec<String>>,
    pub backs: Mutex<usize>,
}

impl ContentView for RecordingView {
    fn load_url(&self, url: &str) -> Result<()> {
        self.loaded.lock().push(url.to_string());
        Ok(())
    }

    fn go_back(&self) -> Result<()> {
        *self.backs.lock() += 1;
        Ok(())
    }
}

pub struct FixedDevice {
    pub api_level: Option<u32>,
    pub fail: bool,
}

impl FixedDevice {
    pub fn pixel() -> Self {
        Self {
            api_level: Some(34),
            fail: false,
        }
    }
}

impl DeviceInfoProvider for FixedDevice {
    fn profile(&self) -> Result<DeviceProfile> {
        if self.fail {
            return Err(CoreError::Device("telephony service unavailable".to_string()));
        }
        Ok(DeviceProfile {
            model: "Pixel 7".to_string(),
            os_version: "14".to_string(),
            manufacturer: "Google".to_string(),
            api_level: self.api_level,
        })
    }

    fn hardware_id(&self) -> Result<Option<String>> {
        Ok(Some("358240051111110".to_string()))
    }
}

/// Store whose disk is gone
pub struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str, _default: &str) -> hybridchat_storage::Result<String> {
        Err(StorageError::Io(std::io::Error::other("disk unavailable")))
    }

    fn put(&self, _key: &str, _value: &str) -> hybridchat_storage::Result<()> {
        Err(StorageError::Io(std::io::Error::other("disk unavailable")))
    }
}

pub struct Harness {
    pub os: Arc<InMemoryPermissions>,
    pub gate: Arc<PermissionGate>,
    pub notifier: Arc<RecordingNotifier>,
    pub ui: UiLoop,
    pub bridge: NativeBridge,
}

pub fn harness_with_store(os: InMemoryPermissions, store: Arc<dyn KeyValueStore>) -> Harness {
    let os = Arc::new(os);
    let gate = Arc::new(PermissionGate::new(os.clone()));
    let notifier = Arc::new(RecordingNotifier::default());
    let (dispatcher, ui) = ui_channel();

    let bridge = NativeBridge::new(
        gate.clone(),
        ChatHistory::new(store),
        Arc::new(FixedDevice::pixel()),
        notifier.clone(),
        Arc::new(dispatcher),
    );

    Harness {
        os,
        gate,
        notifier,
        ui,
        bridge,
    }
}

pub fn harness(os: InMemoryPermissions) -> Harness {
    let db = Database::open_in_memory().unwrap();
    harness_with_store(os, Arc::new(Preferences::new(db, CHAT_HISTORY_NAMESPACE)))
}
