//! Application state management
use hybridchat_core::HostShell;

/// Managed by Tauri; commands reach the shell through it
pub struct AppState {
    shell: HostShell,
}

impl AppState {
    pub fn new(shell: HostShell) -> Self {
        Self { shell }
    }

    pub fn shell(&self) -> &HostShell {
        &self.shell
    }
}
