mod common;

use std::path::PathBuf;
use std::sync::Arc;

use common::{FixedDevice, RecordingNotifier, RecordingView};
use hybridchat_core::{
    ui_channel, BackAction, Capability, CapabilityState, Config, Database, HostShell,
    InMemoryPermissions, MediaDecision, MediaResource, PermissionOutcome, Platform, UiLoop,
    ALL_GRANTED_TOAST, MEDIA_DENIED_TOAST, PARTIAL_GRANT_TOAST,
};

struct Fixture {
    os: Arc<InMemoryPermissions>,
    notifier: Arc<RecordingNotifier>,
    view: Arc<RecordingView>,
    ui: UiLoop,
    shell: HostShell,
}

fn fixture(os: InMemoryPermissions) -> Fixture {
    let os = Arc::new(os);
    let notifier = Arc::new(RecordingNotifier::default());
    let view = Arc::new(RecordingView::default());
    let (dispatcher, ui) = ui_channel();

    let platform = Platform {
        permissions: os.clone(),
        device: Arc::new(FixedDevice::pixel()),
        notifier: notifier.clone(),
        ui: Arc::new(dispatcher),
        view: view.clone(),
    };
    let config = Config::new(PathBuf::from("/unused"));
    let shell = HostShell::with_database(config, Database::open_in_memory().unwrap(), platform);

    Fixture {
        os,
        notifier,
        view,
        ui,
        shell,
    }
}

#[test]
fn startup_loads_entry_page_and_requests_everything() {
    let f = fixture(InMemoryPermissions::new());

    let token = f.shell.on_create().unwrap().unwrap();

    assert_eq!(*f.view.loaded.lock(), vec!["http://10.0.2.2:3000".to_string()]);
    let fired = f.os.fired_requests();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].token, token);
    assert_eq!(fired[0].capabilities, Capability::ALL.to_vec());
    assert_eq!(
        f.shell.gate().state(Capability::PhoneState),
        CapabilityState::Requesting
    );
}

#[test]
fn startup_with_everything_granted_asks_nothing() {
    let f = fixture(InMemoryPermissions::with_granted(&Capability::ALL));

    assert_eq!(f.shell.on_create().unwrap(), None);
    assert!(f.os.fired_requests().is_empty());
}

#[test]
fn permission_results_are_announced() {
    let f = fixture(InMemoryPermissions::new());
    let token = f.shell.on_create().unwrap().unwrap();

    let flags = f.os.answer(token, &[true, true, true]);
    assert_eq!(
        f.shell.on_request_permissions_result(token, &flags),
        PermissionOutcome::Granted
    );
    assert_eq!(f.notifier.texts(), vec![ALL_GRANTED_TOAST.to_string()]);
}

#[test]
fn partial_grant_is_announced() {
    let f = fixture(InMemoryPermissions::new());
    let token = f.shell.on_create().unwrap().unwrap();

    let flags = f.os.answer(token, &[true, true, false]);
    let outcome = f.shell.on_request_permissions_result(token, &flags);

    assert_eq!(
        outcome,
        PermissionOutcome::PartiallyGranted {
            denied: vec![Capability::PhoneState]
        }
    );
    assert_eq!(f.notifier.texts(), vec![PARTIAL_GRANT_TOAST.to_string()]);
    // Device info still works, just without the hardware id
    let info: serde_json::Value =
        serde_json::from_str(&f.shell.bridge().get_device_info()).unwrap();
    assert!(info.get("imei").is_none());
}

#[test]
fn stray_result_is_ignored_quietly() {
    let f = fixture(InMemoryPermissions::new());

    let outcome = f
        .shell
        .on_request_permissions_result(hybridchat_core::RequestToken::new(9), &[true]);

    assert_eq!(outcome, PermissionOutcome::UnknownToken);
    assert!(f.notifier.texts().is_empty());
}

#[test]
fn media_request_from_page_follows_os_grants() {
    let f = fixture(InMemoryPermissions::new());
    let requested = vec![MediaResource::AudioCapture, MediaResource::VideoCapture];

    assert_eq!(
        f.shell.on_media_request(requested.clone()),
        MediaDecision::Deny
    );
    assert_eq!(f.notifier.texts(), vec![MEDIA_DENIED_TOAST.to_string()]);

    f.os.set_granted(Capability::Camera, true);
    f.os.set_granted(Capability::Microphone, true);
    assert_eq!(
        f.shell.on_media_request(requested.clone()),
        MediaDecision::Grant(requested)
    );
}

#[test]
fn bridge_media_request_goes_through_ui_loop() {
    let mut f = fixture(InMemoryPermissions::new());

    assert!(!f.shell.bridge().request_media_permissions());
    assert_eq!(f.ui.run_pending(), 1);

    let token = f.os.fired_requests()[0].token;
    let flags = f.os.answer(token, &[true, true]);
    f.shell.on_request_permissions_result(token, &flags);

    assert!(f.shell.bridge().request_media_permissions());
}

#[test]
fn back_walks_history_then_exits() {
    let f = fixture(InMemoryPermissions::new());
    f.shell.on_page_finished("http://10.0.2.2:3000/");
    f.shell.on_page_finished("http://10.0.2.2:3000/chat/bob");

    assert!(f.shell.can_go_back());
    assert_eq!(f.shell.on_back_pressed(), BackAction::NavigatedBack);
    assert_eq!(*f.view.backs.lock(), 1);
    assert_eq!(
        f.shell.current_url().as_deref(),
        Some("http://10.0.2.2:3000/")
    );

    // The view reports the page it went back to
    f.shell.on_page_finished("http://10.0.2.2:3000/");
    assert_eq!(f.shell.on_back_pressed(), BackAction::Exit);
    assert_eq!(*f.view.backs.lock(), 1);
}

#[test]
fn back_on_entry_page_exits_after_blank_start() {
    let f = fixture(InMemoryPermissions::new());

    // The desktop window opens on a blank page before the entry page loads
    f.shell.on_page_finished("about:blank");
    f.shell.on_create().unwrap();
    f.shell.on_page_finished("http://10.0.2.2:3000");

    assert!(!f.shell.can_go_back());
    assert_eq!(f.shell.on_back_pressed(), BackAction::Exit);
    assert_eq!(*f.view.backs.lock(), 0);
    assert_eq!(
        f.shell.current_url().as_deref(),
        Some("http://10.0.2.2:3000/")
    );
}

#[test]
fn links_stay_in_the_content_view() {
    let f = fixture(InMemoryPermissions::new());

    assert!(f.shell.should_override_url_loading("https://example.com/docs"));
    assert_eq!(
        *f.view.loaded.lock(),
        vec!["https://example.com/docs".to_string()]
    );
}

#[test]
fn navigation_check_does_not_reload() {
    let f = fixture(InMemoryPermissions::new());

    assert!(f.shell.allows_navigation("http://10.0.2.2:3000/chat/bob"));
    assert!(f.shell.allows_navigation("about:blank"));
    assert!(!f.shell.allows_navigation("tel:+15551234"));
    assert!(!f.shell.allows_navigation("intent://scan/#Intent;end"));
    assert!(!f.shell.allows_navigation("not a url"));

    assert!(f.view.loaded.lock().is_empty());
}

#[test]
fn js_alert_becomes_toast() {
    let f = fixture(InMemoryPermissions::new());

    assert!(f.shell.on_js_alert("Connection lost"));
    assert_eq!(f.notifier.texts(), vec!["Connection lost".to_string()]);
}

#[test]
fn shell_opens_database_from_config() {
    let dir = std::env::temp_dir().join(format!("hybridchat-shell-{}", std::process::id()));
    let config = Config::new(dir.clone());
    let (dispatcher, _ui) = ui_channel();
    let platform = Platform {
        permissions: Arc::new(InMemoryPermissions::new()),
        device: Arc::new(FixedDevice::pixel()),
        notifier: Arc::new(RecordingNotifier::default()),
        ui: Arc::new(dispatcher),
        view: Arc::new(RecordingView::default()),
    };

    {
        let shell = HostShell::new(config.clone(), platform.clone()).unwrap();
        assert!(shell.bridge().save_chat_history("[\"persisted\"]"));
    }

    let shell = HostShell::new(config, platform).unwrap();
    assert_eq!(shell.bridge().get_chat_history(), "[\"persisted\"]");

    drop(shell);
    let _ = std::fs::remove_dir_all(dir);
}
