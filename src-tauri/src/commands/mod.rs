//! Tauri IPC Commands
//!
//! The page reaches the native bridge through these. A small init script
//! also installs them as `window.AndroidNative` so the page can use the same
//! object name it uses inside the Android shell.

pub mod bridge;
pub mod navigation;
