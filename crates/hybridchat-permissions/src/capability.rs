//! Capabilities and their grant state machine
//!
//! ```text
//! Unknown
//!   ↓ request_all
//! Requesting
//!   ↓ on_result
//! Granted | Denied
//! ```
//!
//! Granted and Denied only change when the OS changes its answer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    Camera,
    Microphone,
    PhoneState,
}

impl Capability {
    /// Everything the shell asks for at startup
    pub const ALL: [Capability; 3] = [
        Capability::Camera,
        Capability::Microphone,
        Capability::PhoneState,
    ];

    /// What a web call needs before media capture can be handed to content
    pub const MEDIA: [Capability; 2] = [Capability::Camera, Capability::Microphone];

    /// The platform permission string the OS knows this capability by
    pub fn platform_name(&self) -> &'static str {
        match self {
            Capability::Camera => "android.permission.CAMERA",
            Capability::Microphone => "android.permission.RECORD_AUDIO",
            Capability::PhoneState => "android.permission.READ_PHONE_STATE",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Camera => "camera",
            Capability::Microphone => "microphone",
            Capability::PhoneState => "phoneState",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Capability {
    type Err = crate::PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s) || c.platform_name() == s)
            .ok_or_else(|| crate::PermissionError::UnknownCapability(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityState {
    /// Never asked about in this process
    Unknown,
    /// A request naming this capability is waiting on the user
    Requesting,
    Granted,
    Denied,
}

impl CapabilityState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityState::Unknown => "unknown",
            CapabilityState::Requesting => "requesting",
            CapabilityState::Granted => "granted",
            CapabilityState::Denied => "denied",
        }
    }
}

impl std::fmt::Display for CapabilityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Correlates an outstanding OS request with the result callback.
///
/// Platforms carry this as a 16-bit request code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestToken(u16);

impl RequestToken {
    pub const FIRST: RequestToken = RequestToken(100);

    pub fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn code(&self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
