//! Native bridge exposed to the hosted page
//!
//! The page sees a single object named [`BRIDGE_NAME`] with five methods.
//! Nothing here raises across that boundary: failures are logged and turned
//! into a sentinel string or `false` right at the method edge.

use serde::Serialize;
use std::sync::Arc;

use hybridchat_permissions::{Capability, PermissionGate};

use crate::device::{DeviceInfoProvider, DeviceInfoSnapshot};
use crate::dispatch::UiDispatcher;
use crate::error::BridgeError;
use crate::history::{ChatHistory, EMPTY_HISTORY};
use crate::notify::{Notifier, ToastDuration};

/// Name the bridge object is registered under in the page's global scope
pub const BRIDGE_NAME: &str = "AndroidNative";

pub const BRIDGE_METHODS: [&str; 5] = [
    "getDeviceInfo",
    "requestMediaPermissions",
    "showNotification",
    "saveChatHistory",
    "getChatHistory",
];

/// Returned by `getDeviceInfo` when the device cannot be queried
pub const DEVICE_INFO_ERROR: &str = r#"{"error": "failed to read device info"}"#;

/// Value handed back to the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BridgeValue {
    Str(String),
    Bool(bool),
    Void,
}

#[derive(Clone)]
pub struct NativeBridge {
    gate: Arc<PermissionGate>,
    history: ChatHistory,
    device: Arc<dyn DeviceInfoProvider>,
    notifier: Arc<dyn Notifier>,
    ui: Arc<dyn UiDispatcher>,
}

impl NativeBridge {
    pub fn new(
        gate: Arc<PermissionGate>,
        history: ChatHistory,
        device: Arc<dyn DeviceInfoProvider>,
        notifier: Arc<dyn Notifier>,
        ui: Arc<dyn UiDispatcher>,
    ) -> Self {
        Self {
            gate,
            history,
            device,
            notifier,
            ui,
        }
    }

    /// Device snapshot as pretty JSON, or [`DEVICE_INFO_ERROR`]
    pub fn get_device_info(&self) -> String {
        match DeviceInfoSnapshot::collect(self.device.as_ref(), &self.gate)
            .and_then(|snapshot| snapshot.to_json())
        {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read device info");
                DEVICE_INFO_ERROR.to_string()
            }
        }
    }

    /// True when camera and microphone are both granted already.
    ///
    /// Otherwise the OS prompt is queued on the UI context and this returns
    /// false right away; the page has to ask again after the user answers.
    pub fn request_media_permissions(&self) -> bool {
        if self.gate.all_granted(&Capability::MEDIA) {
            return true;
        }

        let gate = Arc::clone(&self.gate);
        self.ui.post(Box::new(move || {
            gate.request_all(&Capability::MEDIA);
        }));

        false
    }

    pub fn show_notification(&self, title: &str, message: &str) {
        let notifier = Arc::clone(&self.notifier);
        let text = format!("{}: {}", title, message);

        self.ui.post(Box::new(move || {
            notifier.show(&text, ToastDuration::Long);
            tracing::debug!(notification = %text, "Showed notification");
        }));
    }

    pub fn save_chat_history(&self, chat_data: &str) -> bool {
        match self.history.save(chat_data) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Failed to save chat history");
                false
            }
        }
    }

    pub fn get_chat_history(&self) -> String {
        match self.history.load() {
            Ok(history) => history,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load chat history");
                EMPTY_HISTORY.to_string()
            }
        }
    }

    /// Route a call from the content runtime by method name
    pub fn invoke(
        &self,
        method: &str,
        args: &[serde_json::Value],
    ) -> std::result::Result<BridgeValue, BridgeError> {
        tracing::trace!(method, argc = args.len(), "Bridge call");

        match method {
            "getDeviceInfo" => {
                expect_arity(method, args, 0)?;
                Ok(BridgeValue::Str(self.get_device_info()))
            }
            "requestMediaPermissions" => {
                expect_arity(method, args, 0)?;
                Ok(BridgeValue::Bool(self.request_media_permissions()))
            }
            "showNotification" => {
                expect_arity(method, args, 2)?;
                let title = string_arg(method, args, 0)?;
                let message = string_arg(method, args, 1)?;
                self.show_notification(title, message);
                Ok(BridgeValue::Void)
            }
            "saveChatHistory" => {
                expect_arity(method, args, 1)?;
                let chat_data = string_arg(method, args, 0)?;
                Ok(BridgeValue::Bool(self.save_chat_history(chat_data)))
            }
            "getChatHistory" => {
                expect_arity(method, args, 0)?;
                Ok(BridgeValue::Str(self.get_chat_history()))
            }
            _ => Err(BridgeError::UnknownMethod(method.to_string())),
        }
    }
}

fn expect_arity(
    method: &str,
    args: &[serde_json::Value],
    expected: usize,
) -> std::result::Result<(), BridgeError> {
    if args.len() != expected {
        return Err(BridgeError::Arity {
            method: method.to_string(),
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn string_arg<'a>(
    method: &str,
    args: &'a [serde_json::Value],
    index: usize,
) -> std::result::Result<&'a str, BridgeError> {
    args.get(index)
        .and_then(|v| v.as_str())
        .ok_or_else(|| BridgeError::InvalidArgument {
            method: method.to_string(),
            index,
        })
}
