//! Media capture requests raised by page content (getUserMedia and friends)

use serde::{Deserialize, Serialize};

use hybridchat_permissions::{Capability, PermissionGate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaResource {
    VideoCapture,
    AudioCapture,
    ProtectedMediaId,
    MidiSysex,
}

impl MediaResource {
    pub fn platform_name(&self) -> &'static str {
        match self {
            MediaResource::VideoCapture => "android.webkit.resource.VIDEO_CAPTURE",
            MediaResource::AudioCapture => "android.webkit.resource.AUDIO_CAPTURE",
            MediaResource::ProtectedMediaId => "android.webkit.resource.PROTECTED_MEDIA_ID",
            MediaResource::MidiSysex => "android.webkit.resource.MIDI_SYSEX",
        }
    }
}

impl std::str::FromStr for MediaResource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            MediaResource::VideoCapture,
            MediaResource::AudioCapture,
            MediaResource::ProtectedMediaId,
            MediaResource::MidiSysex,
        ]
        .into_iter()
        .find(|r| r.platform_name() == s)
        .ok_or_else(|| format!("Unknown media resource: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaDecision {
    Grant(Vec<MediaResource>),
    Deny,
}

impl MediaDecision {
    /// Content gets everything it asked for once camera and microphone are
    /// both granted at the OS level, and nothing otherwise.
    pub fn decide(gate: &PermissionGate, requested: Vec<MediaResource>) -> Self {
        if gate.all_granted(&Capability::MEDIA) {
            MediaDecision::Grant(requested)
        } else {
            MediaDecision::Deny
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, MediaDecision::Grant(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hybridchat_permissions::InMemoryPermissions;
    use std::sync::Arc;

    #[test]
    fn test_grant_requires_camera_and_microphone() {
        let os = Arc::new(InMemoryPermissions::with_granted(&[Capability::Camera]));
        let gate = PermissionGate::new(os.clone());
        let requested = vec![MediaResource::VideoCapture, MediaResource::AudioCapture];

        assert_eq!(
            MediaDecision::decide(&gate, requested.clone()),
            MediaDecision::Deny
        );

        os.set_granted(Capability::Microphone, true);
        assert_eq!(
            MediaDecision::decide(&gate, requested.clone()),
            MediaDecision::Grant(requested)
        );
    }

    #[test]
    fn test_platform_names_round_trip() {
        let parsed: MediaResource = "android.webkit.resource.AUDIO_CAPTURE".parse().unwrap();
        assert_eq!(parsed, MediaResource::AudioCapture);
        assert!("camera".parse::<MediaResource>().is_err());
    }
}
