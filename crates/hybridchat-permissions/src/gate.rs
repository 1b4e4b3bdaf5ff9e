//! Permission gate
//!
//! Answers "is this capability usable" by asking the OS every time, and
//! correlates outstanding requests with their result callbacks by token.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;

use crate::capability::{Capability, CapabilityState, RequestToken};
use crate::error::PermissionError;
use crate::subsystem::PermissionSubsystem;
use crate::Result;

/// How a delivered result turned out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionOutcome {
    /// Every capability in the request was granted
    Granted,
    /// At least one capability was refused
    PartiallyGranted { denied: Vec<Capability> },
    /// The prompt was dismissed without an answer
    Cancelled,
    /// The token matched no outstanding request
    UnknownToken,
}

impl PermissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PermissionOutcome::Granted)
    }
}

pub struct PermissionGate {
    os: Arc<dyn PermissionSubsystem>,
    /// Outstanding requests: token -> capabilities in request order
    pending: Mutex<HashMap<RequestToken, Vec<Capability>>>,
    /// Last answer the user gave per capability
    answered: RwLock<HashMap<Capability, bool>>,
    next_token: AtomicU16,
}

impl PermissionGate {
    pub fn new(os: Arc<dyn PermissionSubsystem>) -> Self {
        Self {
            os,
            pending: Mutex::new(HashMap::new()),
            answered: RwLock::new(HashMap::new()),
            next_token: AtomicU16::new(RequestToken::FIRST.code()),
        }
    }

    /// Ask the OS whether a capability is currently granted
    pub fn check_granted(&self, capability: Capability) -> bool {
        self.os.check_granted(capability)
    }

    pub fn all_granted(&self, capabilities: &[Capability]) -> bool {
        capabilities.iter().all(|c| self.check_granted(*c))
    }

    /// Current state of a capability
    ///
    /// A live OS grant always wins, so external changes show up immediately.
    pub fn state(&self, capability: Capability) -> CapabilityState {
        if self.check_granted(capability) {
            return CapabilityState::Granted;
        }

        let requesting = self
            .pending
            .lock()
            .values()
            .any(|caps| caps.contains(&capability));
        if requesting {
            return CapabilityState::Requesting;
        }

        if self.answered.read().contains_key(&capability) {
            CapabilityState::Denied
        } else {
            CapabilityState::Unknown
        }
    }

    /// Fire one OS request for the whole set if anything in it is missing.
    ///
    /// Returns the request's token, or `None` when every capability is
    /// already granted or the platform refused to start the prompt.
    pub fn request_all(&self, capabilities: &[Capability]) -> Option<RequestToken> {
        let mut requested: Vec<Capability> = Vec::with_capacity(capabilities.len());
        for capability in capabilities {
            if !requested.contains(capability) {
                requested.push(*capability);
            }
        }

        if requested.is_empty() || self.all_granted(&requested) {
            tracing::debug!(?requested, "All capabilities already granted");
            return None;
        }

        let token = {
            let mut pending = self.pending.lock();
            let token = self.allocate_token(&pending);
            pending.insert(token, requested.clone());
            token
        };

        // The platform may answer synchronously, so the lock must be released first
        if let Err(e) = self.os.request_all(&requested, token) {
            self.pending.lock().remove(&token);
            tracing::error!(token = %token, error = %e, "Failed to start permission request");
            return None;
        }

        tracing::info!(token = %token, ?requested, "Requested permissions");

        Some(token)
    }

    /// Next request code that no outstanding request holds.
    ///
    /// Codes wrap within 16 bits, so a long-lived request may still own the
    /// code the counter comes back around to.
    fn allocate_token(&self, pending: &HashMap<RequestToken, Vec<Capability>>) -> RequestToken {
        loop {
            let token = RequestToken::new(self.next_token.fetch_add(1, Ordering::Relaxed));
            if !pending.contains_key(&token) {
                return token;
            }
            tracing::debug!(token = %token, "Request code still outstanding, skipping");
        }
    }

    /// Deliver the user's answer for an outstanding request.
    ///
    /// Flags line up with the request's capabilities by position. Never
    /// fails: anything unexpected degrades to "not granted".
    pub fn on_result(&self, token: RequestToken, granted_flags: &[bool]) -> PermissionOutcome {
        match self.resolve(token, granted_flags) {
            Ok(denied) if denied.is_empty() => {
                tracing::info!(token = %token, "All requested permissions granted");
                PermissionOutcome::Granted
            }
            Ok(denied) => {
                tracing::warn!(token = %token, ?denied, "Some permissions were denied");
                PermissionOutcome::PartiallyGranted { denied }
            }
            Err(PermissionError::Cancelled(_)) => {
                tracing::warn!(token = %token, "Permission request cancelled");
                PermissionOutcome::Cancelled
            }
            Err(e) => {
                tracing::warn!(token = %token, error = %e, "Ignoring permission result");
                PermissionOutcome::UnknownToken
            }
        }
    }

    fn resolve(&self, token: RequestToken, granted_flags: &[bool]) -> Result<Vec<Capability>> {
        let capabilities = self
            .pending
            .lock()
            .remove(&token)
            .ok_or(PermissionError::UnknownToken(token))?;

        let mut answered = self.answered.write();

        if granted_flags.is_empty() {
            for capability in &capabilities {
                answered.insert(*capability, false);
            }
            return Err(PermissionError::Cancelled(token));
        }

        let mut denied = Vec::new();
        for (i, capability) in capabilities.iter().enumerate() {
            let granted = granted_flags.get(i).copied().unwrap_or(false);
            answered.insert(*capability, granted);
            if !granted {
                denied.push(*capability);
            }
        }

        Ok(denied)
    }

    pub fn is_pending(&self, token: RequestToken) -> bool {
        self.pending.lock().contains_key(&token)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}
