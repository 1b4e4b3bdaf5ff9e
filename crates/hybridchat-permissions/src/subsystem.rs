//! The OS side of the permission flow

use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;

use crate::capability::{Capability, RequestToken};
use crate::Result;

/// Platform authorization subsystem.
///
/// `request_all` only starts the prompt. The platform later reports the
/// user's answer by handing the same token to
/// [`PermissionGate::on_result`](crate::PermissionGate::on_result).
pub trait PermissionSubsystem: Send + Sync {
    fn check_granted(&self, capability: Capability) -> bool;

    fn request_all(&self, capabilities: &[Capability], token: RequestToken) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredRequest {
    pub token: RequestToken,
    pub capabilities: Vec<Capability>,
}

/// Permission subsystem kept entirely in process.
///
/// Used by hosts without runtime prompts and by tests. Grants only change
/// through [`set_granted`](Self::set_granted) or [`answer`](Self::answer).
#[derive(Default)]
pub struct InMemoryPermissions {
    granted: RwLock<HashSet<Capability>>,
    fired: Mutex<Vec<FiredRequest>>,
}

impl InMemoryPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_granted(capabilities: &[Capability]) -> Self {
        let permissions = Self::new();
        permissions
            .granted
            .write()
            .extend(capabilities.iter().copied());
        permissions
    }

    pub fn set_granted(&self, capability: Capability, granted: bool) {
        let mut set = self.granted.write();
        if granted {
            set.insert(capability);
        } else {
            set.remove(&capability);
        }
    }

    /// Every request fired so far, oldest first
    pub fn fired_requests(&self) -> Vec<FiredRequest> {
        self.fired.lock().clone()
    }

    /// Simulate the user answering a fired request.
    ///
    /// Applies `answers` position by position to the request's capabilities
    /// and returns the flags the platform would deliver. Missing answers
    /// count as denials.
    pub fn answer(&self, token: RequestToken, answers: &[bool]) -> Vec<bool> {
        let capabilities = self
            .fired
            .lock()
            .iter()
            .rev()
            .find(|r| r.token == token)
            .map(|r| r.capabilities.clone())
            .unwrap_or_default();

        capabilities
            .iter()
            .enumerate()
            .map(|(i, capability)| {
                let granted = answers.get(i).copied().unwrap_or(false);
                self.set_granted(*capability, granted);
                granted
            })
            .collect()
    }
}

impl PermissionSubsystem for InMemoryPermissions {
    fn check_granted(&self, capability: Capability) -> bool {
        self.granted.read().contains(&capability)
    }

    fn request_all(&self, capabilities: &[Capability], token: RequestToken) -> Result<()> {
        self.fired.lock().push(FiredRequest {
            token,
            capabilities: capabilities.to_vec(),
        });
        Ok(())
    }
}
