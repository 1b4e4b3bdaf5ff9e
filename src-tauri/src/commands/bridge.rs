//! Native bridge commands
use tauri::State;

use crate::state::AppState;

/// Installs `window.AndroidNative` on every page. Calls resolve as promises
/// here since Tauri IPC is asynchronous.
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(() => {
  const invoke = (cmd, args) => window.__TAURI__.core.invoke(cmd, args);
  window.AndroidNative = {
    getDeviceInfo: () => invoke('get_device_info'),
    requestMediaPermissions: () => invoke('request_media_permissions'),
    showNotification: (title, message) => invoke('show_notification', { title, message }),
    saveChatHistory: (chatData) => invoke('save_chat_history', { chatData }),
    getChatHistory: () => invoke('get_chat_history'),
  };
})();
"#;

#[tauri::command]
pub fn get_device_info(state: State<'_, AppState>) -> String {
    state.shell().bridge().get_device_info()
}

#[tauri::command]
pub fn request_media_permissions(state: State<'_, AppState>) -> bool {
    state.shell().bridge().request_media_permissions()
}

#[tauri::command]
pub fn show_notification(state: State<'_, AppState>, title: String, message: String) {
    state.shell().bridge().show_notification(&title, &message);
}

#[tauri::command]
pub fn save_chat_history(state: State<'_, AppState>, chat_data: String) -> bool {
    state.shell().bridge().save_chat_history(&chat_data)
}

#[tauri::command]
pub fn get_chat_history(state: State<'_, AppState>) -> String {
    state.shell().bridge().get_chat_history()
}
