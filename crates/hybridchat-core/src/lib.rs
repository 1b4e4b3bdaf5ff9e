//! HybridChat Core
//!
//! Native side of the hybrid chat shell. The hosted web application owns
//! the chat UI; this crate owns everything it cannot do from inside the
//! page: device identification, OS permission prompts, toasts and a durable
//! copy of the chat transcript.

mod bridge;
mod config;
mod device;
mod dispatch;
mod error;
mod history;
mod media;
mod navigation;
mod notify;
mod shell;

pub use bridge::{BridgeValue, NativeBridge, BRIDGE_METHODS, BRIDGE_NAME, DEVICE_INFO_ERROR};
pub use config::{Config, DEFAULT_ENTRY_URL};
pub use device::{
    DeviceInfoProvider, DeviceInfoSnapshot, DeviceProfile, SystemDevice,
    HARDWARE_ID_MIN_API_LEVEL,
};
pub use dispatch::{ui_channel, ChannelDispatcher, UiDispatcher, UiLoop, UiTask};
pub use error::{BridgeError, CoreError};
pub use history::{ChatHistory, CHAT_HISTORY_KEY, CHAT_HISTORY_NAMESPACE, EMPTY_HISTORY};
pub use media::{MediaDecision, MediaResource};
pub use navigation::{NavigationEntry, NavigationHistory};
pub use notify::{Notifier, ToastDuration};
pub use shell::{
    BackAction, ContentView, HostShell, Platform, ALL_GRANTED_TOAST, MEDIA_DENIED_TOAST,
    PARTIAL_GRANT_TOAST,
};

// Re-export the collaborating crates
pub use hybridchat_permissions::{
    Capability, CapabilityState, FiredRequest, InMemoryPermissions, PermissionError,
    PermissionGate, PermissionOutcome, PermissionSubsystem, RequestToken,
};
pub use hybridchat_permissions::Result as PermissionResult;
pub use hybridchat_storage::{Database, KeyValueStore, Preferences, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// `RUST_LOG` wins over `default_filter` when set.
pub fn init_logging(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be installed by the embedding host
    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
