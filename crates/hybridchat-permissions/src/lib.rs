//! HybridChat Permission Gate
//!
//! Tracks whether the OS-mediated capabilities the hosted chat needs are
//! usable and drives the platform's permission request flow:
//!
//! | Capability | Platform permission                    | Needed by                  |
//! | Camera     | `android.permission.CAMERA`            | video calls                |
//! | Microphone | `android.permission.RECORD_AUDIO`      | voice and video calls      |
//! | PhoneState | `android.permission.READ_PHONE_STATE`  | hardware id in device info |
//!
//! The OS stays the only source of truth for grants. The gate only remembers
//! which requests are outstanding and what the last answer was, so it can
//! report `Requesting` and `Denied` states.

mod capability;
mod error;
mod gate;
mod subsystem;

pub use capability::{Capability, CapabilityState, RequestToken};
pub use error::PermissionError;
pub use gate::{PermissionGate, PermissionOutcome};
pub use subsystem::{FiredRequest, InMemoryPermissions, PermissionSubsystem};

pub type Result<T> = std::result::Result<T, PermissionError>;
