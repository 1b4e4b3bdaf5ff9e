//! Back action for the host chrome
use hybridchat_core::BackAction;
use tauri::{AppHandle, State};

use crate::state::AppState;

/// Returns false when there was nothing to go back to and the app is closing
#[tauri::command]
pub fn navigate_back(app: AppHandle, state: State<'_, AppState>) -> bool {
    match state.shell().on_back_pressed() {
        BackAction::NavigatedBack => true,
        BackAction::Exit => {
            tracing::info!("Back pressed on first page, exiting");
            app.exit(0);
            false
        }
    }
}
