//! Host shell
//!
//! Owns the content view and everything the page talks to. Platform glue
//! forwards lifecycle and content-view callbacks here; all of them are
//! expected on the UI context.

use parking_lot::RwLock;
use std::sync::Arc;

use hybridchat_permissions::{
    Capability, PermissionGate, PermissionOutcome, PermissionSubsystem, RequestToken,
};
use hybridchat_storage::{Database, Preferences};

use crate::bridge::NativeBridge;
use crate::config::Config;
use crate::device::DeviceInfoProvider;
use crate::dispatch::UiDispatcher;
use crate::history::{ChatHistory, CHAT_HISTORY_NAMESPACE};
use crate::media::{MediaDecision, MediaResource};
use crate::navigation::NavigationHistory;
use crate::notify::{Notifier, ToastDuration};
use crate::Result;

pub const ALL_GRANTED_TOAST: &str = "All permissions granted";
pub const PARTIAL_GRANT_TOAST: &str =
    "Some permissions were not granted; some features may be unavailable";
pub const MEDIA_DENIED_TOAST: &str = "Please grant camera and microphone permissions first";

/// Schemes the content view renders in place
const VIEWABLE_SCHEMES: [&str; 6] = ["http", "https", "file", "about", "data", "blob"];

/// The embedded browser component
pub trait ContentView: Send + Sync {
    fn load_url(&self, url: &str) -> Result<()>;

    fn go_back(&self) -> Result<()>;
}

/// Platform services the shell is wired to
#[derive(Clone)]
pub struct Platform {
    pub permissions: Arc<dyn PermissionSubsystem>,
    pub device: Arc<dyn DeviceInfoProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub ui: Arc<dyn UiDispatcher>,
    pub view: Arc<dyn ContentView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// The content view went back one page
    NavigatedBack,
    /// Nothing to go back to; the host should close
    Exit,
}

pub struct HostShell {
    config: Config,
    gate: Arc<PermissionGate>,
    bridge: NativeBridge,
    notifier: Arc<dyn Notifier>,
    view: Arc<dyn ContentView>,
    navigation: RwLock<NavigationHistory>,
}

impl HostShell {
    /// Open the database named in `config` and wire the shell
    pub fn new(config: Config, platform: Platform) -> Result<Self> {
        config.validate()?;
        let db = Database::open(&config.database_path)?;
        Ok(Self::with_database(config, db, platform))
    }

    pub fn with_database(config: Config, db: Database, platform: Platform) -> Self {
        let gate = Arc::new(PermissionGate::new(platform.permissions));
        let history = ChatHistory::new(Arc::new(Preferences::new(db, CHAT_HISTORY_NAMESPACE)));
        let bridge = NativeBridge::new(
            Arc::clone(&gate),
            history,
            platform.device,
            Arc::clone(&platform.notifier),
            platform.ui,
        );

        Self {
            config,
            gate,
            bridge,
            notifier: platform.notifier,
            view: platform.view,
            navigation: RwLock::new(NavigationHistory::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bridge(&self) -> &NativeBridge {
        &self.bridge
    }

    pub fn gate(&self) -> &Arc<PermissionGate> {
        &self.gate
    }

    /// Load the entry page, then ask for every capability the chat uses.
    ///
    /// Returns the startup request's token, if one was needed.
    pub fn on_create(&self) -> Result<Option<RequestToken>> {
        self.view.load_url(&self.config.entry_url)?;
        tracing::info!(entry_url = %self.config.entry_url, "Loading entry page");

        Ok(self.gate.request_all(&Capability::ALL))
    }

    /// The platform's answer to a permission prompt
    pub fn on_request_permissions_result(
        &self,
        token: RequestToken,
        granted_flags: &[bool],
    ) -> PermissionOutcome {
        let outcome = self.gate.on_result(token, granted_flags);

        match &outcome {
            PermissionOutcome::Granted => {
                self.notifier.show(ALL_GRANTED_TOAST, ToastDuration::Short);
            }
            PermissionOutcome::PartiallyGranted { .. } | PermissionOutcome::Cancelled => {
                self.notifier.show(PARTIAL_GRANT_TOAST, ToastDuration::Short);
            }
            PermissionOutcome::UnknownToken => {}
        }

        outcome
    }

    // Android WebView client hooks. Desktop webviews prompt for media, show
    // alerts and load links on their own and only consult `allows_navigation`.

    /// Page content asked for camera/microphone access
    pub fn on_media_request(&self, requested: Vec<MediaResource>) -> MediaDecision {
        let decision = MediaDecision::decide(&self.gate, requested);
        if !decision.is_granted() {
            self.notifier.show(MEDIA_DENIED_TOAST, ToastDuration::Short);
        }
        tracing::debug!(?decision, "Media request");
        decision
    }

    /// `alert()` from the page; shown as a toast and confirmed
    pub fn on_js_alert(&self, message: &str) -> bool {
        self.notifier.show(message, ToastDuration::Short);
        true
    }

    /// Every link stays inside the content view.
    ///
    /// Returns true: the shell handled the navigation itself.
    pub fn should_override_url_loading(&self, url: &str) -> bool {
        if let Err(e) = self.view.load_url(url) {
            tracing::warn!(url, error = %e, "Failed to load link in content view");
        }
        true
    }

    /// Whether a navigation the view is about to start may go ahead in place.
    ///
    /// Nothing is loaded here; the view carries on with the navigation itself.
    pub fn allows_navigation(&self, url: &str) -> bool {
        match url::Url::parse(url) {
            Ok(parsed) if VIEWABLE_SCHEMES.contains(&parsed.scheme()) => true,
            Ok(parsed) => {
                tracing::info!(url, scheme = parsed.scheme(), "Blocking unrenderable navigation");
                false
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Blocking malformed navigation");
                false
            }
        }
    }

    pub fn on_page_finished(&self, url: &str) {
        if let Err(e) = self.navigation.write().visit(url) {
            tracing::warn!(url, error = %e, "Not recording page in history");
        }
        tracing::debug!(url, "Page finished loading");
    }

    pub fn on_back_pressed(&self) -> BackAction {
        let mut navigation = self.navigation.write();
        if !navigation.can_go_back() {
            return BackAction::Exit;
        }

        match self.view.go_back() {
            Ok(()) => {
                navigation.go_back();
                BackAction::NavigatedBack
            }
            Err(e) => {
                tracing::warn!(error = %e, "Content view refused to go back");
                BackAction::Exit
            }
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.navigation.read().can_go_back()
    }

    pub fn current_url(&self) -> Option<String> {
        self.navigation.read().current().map(|entry| entry.url.clone())
    }
}
