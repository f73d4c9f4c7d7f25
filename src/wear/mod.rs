//! Onboarding on the watch: pick a server announced by the phone and start a login flow

mod presenter;

pub use presenter::OnboardingPresenter;

use crate::types::HomeAssistantInstance;

/// Screen driven by the [`OnboardingPresenter`]
pub trait OnboardingView: Send + Sync {
    fn on_instance_found(&self, instance: HomeAssistantInstance);
    fn on_instance_lost(&self, instance: HomeAssistantInstance);
    fn show_loading(&self);
    fn start_authentication(&self, flow_id: &str);
    fn show_error(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingState {
    /// No instance known yet
    Idle,
    /// At least one instance is listed
    Selecting,
    /// An instance was picked and the login flow is being requested
    LoggingIn,
    AuthenticationStarted,
    ErrorShown,
    /// `on_finish` was called, nothing is processed anymore
    Disposed,
}
