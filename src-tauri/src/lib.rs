//! HybridChat - Tauri Application
//!
//! Hosts the chat web app in a single full-window webview and wires the
//! page's native bridge to the Rust core.

mod commands;
mod platform;
mod state;

use std::sync::Arc;

use hybridchat_core::{Config, HostShell, Platform, SystemDevice};
use platform::{
    DesktopPermissions, TauriContentView, TauriDispatcher, TauriNotifier, MAIN_WINDOW,
};
use state::AppState;
use tauri::webview::PageLoadEvent;
use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};

/// Read `config.json` from the app's local data directory, then start logging
fn load_config(app: &AppHandle) -> anyhow::Result<Config> {
    let data_dir = app.path().app_local_data_dir()?;
    let path = data_dir.join("config.json");

    match Config::load(&path, &data_dir) {
        Ok(config) => {
            hybridchat_core::init_logging(&config.log_filter);
            Ok(config)
        }
        Err(e) => {
            let config = Config::new(data_dir);
            hybridchat_core::init_logging(&config.log_filter);
            tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config");
            Ok(config)
        }
    }
}

fn build_shell(app: &AppHandle, config: Config) -> anyhow::Result<HostShell> {
    let platform = Platform {
        permissions: Arc::new(DesktopPermissions::new(app.clone())),
        device: Arc::new(SystemDevice),
        notifier: Arc::new(TauriNotifier::new(app.clone())),
        ui: Arc::new(TauriDispatcher::new(app.clone())),
        view: Arc::new(TauriContentView::new(app.clone(), MAIN_WINDOW)),
    };

    Ok(HostShell::new(config, platform)?)
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            let config = load_config(app.handle())?;
            let handle = app.handle().clone();
            let blank: tauri::Url = "about:blank".parse()?;

            WebviewWindowBuilder::new(app, MAIN_WINDOW, WebviewUrl::External(blank))
                .title("HybridChat")
                .inner_size(420.0, 800.0)
                .initialization_script(commands::bridge::BRIDGE_INIT_SCRIPT)
                .on_navigation(move |url| {
                    // Links stay in the embedded view; the webview loads them itself
                    tracing::debug!(%url, "Navigating");
                    handle
                        .try_state::<AppState>()
                        .map_or(true, |state| state.shell().allows_navigation(url.as_str()))
                })
                .on_page_load(|window, payload| {
                    if !matches!(payload.event(), PageLoadEvent::Finished) {
                        return;
                    }
                    if let Some(state) = window.try_state::<AppState>() {
                        state.shell().on_page_finished(payload.url().as_str());
                    }
                })
                .build()?;

            let shell = build_shell(app.handle(), config)?;
            app.manage(AppState::new(shell));

            let state = app.state::<AppState>();
            state.shell().on_create()?;

            tracing::info!("HybridChat started");

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Native bridge
            commands::bridge::get_device_info,
            commands::bridge::request_media_permissions,
            commands::bridge::show_notification,
            commands::bridge::save_chat_history,
            commands::bridge::get_chat_history,
            // Navigation
            commands::navigation::navigate_back,
        ])
        .run(tauri::generate_context!())
        .expect("error while running HybridChat");
}
