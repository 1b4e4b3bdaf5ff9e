//! Tauri implementations of the shell's platform services

use serde::Serialize;
use std::sync::Arc;
use tauri::{AppHandle, Emitter, Manager};

use hybridchat_core::{
    Capability, ContentView, CoreError, InMemoryPermissions, Notifier, PermissionError,
    PermissionSubsystem, RequestToken, ToastDuration, UiDispatcher, UiTask,
};

use crate::state::AppState;

pub const MAIN_WINDOW: &str = "main";
pub const TOAST_EVENT: &str = "native-toast";

/// Posts to the Tauri event loop thread
pub struct TauriDispatcher {
    app: AppHandle,
}

impl TauriDispatcher {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl UiDispatcher for TauriDispatcher {
    fn post(&self, task: UiTask) {
        if let Err(e) = self.app.run_on_main_thread(task) {
            tracing::warn!(error = %e, "Event loop is gone, dropping UI task");
        }
    }
}

#[derive(Clone, Serialize)]
struct ToastPayload<'a> {
    text: &'a str,
    duration: ToastDuration,
}

/// Toasts are drawn by the page; the shell only emits them
pub struct TauriNotifier {
    app: AppHandle,
}

impl TauriNotifier {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl Notifier for TauriNotifier {
    fn show(&self, text: &str, duration: ToastDuration) {
        tracing::info!(?duration, "{}", text);
        if let Err(e) = self.app.emit(TOAST_EVENT, ToastPayload { text, duration }) {
            tracing::warn!(error = %e, "Failed to emit toast");
        }
    }
}

pub struct TauriContentView {
    app: AppHandle,
    label: String,
}

impl TauriContentView {
    pub fn new(app: AppHandle, label: impl Into<String>) -> Self {
        Self {
            app,
            label: label.into(),
        }
    }

    fn window(&self) -> hybridchat_core::Result<tauri::WebviewWindow> {
        self.app
            .get_webview_window(&self.label)
            .ok_or_else(|| CoreError::ContentView(format!("Webview not found: {}", self.label)))
    }
}

impl ContentView for TauriContentView {
    fn load_url(&self, url: &str) -> hybridchat_core::Result<()> {
        let parsed = url::Url::parse(url)
            .map_err(|e| CoreError::InvalidUrl(format!("{}: {}", url, e)))?;
        self.window()?
            .navigate(parsed)
            .map_err(|e| CoreError::ContentView(format!("Navigation failed: {}", e)))
    }

    fn go_back(&self) -> hybridchat_core::Result<()> {
        self.window()?
            .eval("history.back()")
            .map_err(|e| CoreError::ContentView(format!("Back navigation failed: {}", e)))
    }
}

/// Desktop operating systems mediate camera and microphone access per
/// device rather than per app, so every request is answered with a grant
/// on the next turn of the event loop.
pub struct DesktopPermissions {
    app: AppHandle,
    grants: Arc<InMemoryPermissions>,
}

impl DesktopPermissions {
    pub fn new(app: AppHandle) -> Self {
        Self {
            app,
            grants: Arc::new(InMemoryPermissions::new()),
        }
    }
}

impl PermissionSubsystem for DesktopPermissions {
    fn check_granted(&self, capability: Capability) -> bool {
        self.grants.check_granted(capability)
    }

    fn request_all(
        &self,
        capabilities: &[Capability],
        token: RequestToken,
    ) -> hybridchat_core::PermissionResult<()> {
        self.grants.request_all(capabilities, token)?;

        let app = self.app.clone();
        let grants = Arc::clone(&self.grants);
        let answers = vec![true; capabilities.len()];

        self.app
            .run_on_main_thread(move || {
                let flags = grants.answer(token, &answers);
                match app.try_state::<AppState>() {
                    Some(state) => {
                        state.shell().on_request_permissions_result(token, &flags);
                    }
                    None => tracing::warn!(token = %token, "Shell not ready for permission result"),
                }
            })
            .map_err(|e| PermissionError::Platform(e.to_string()))
    }
}
