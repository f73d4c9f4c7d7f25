use super::{OnboardingState, OnboardingView};
use crate::repository::{AuthenticationRepository, UrlRepository};
use crate::types::{
    DataEvent, DataEventType, HomeAssistantInstance, LoginFlowInit, INSTANCE_PATH,
};
use crate::{HassError, HassResult};

use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinSet;

struct Inner {
    state: OnboardingState,
    instances: Vec<HomeAssistantInstance>,
}

impl Inner {
    fn is_disposed(&self) -> bool {
        self.state == OnboardingState::Disposed
    }

    fn transition(&mut self, next: OnboardingState) {
        if !self.is_disposed() {
            self.state = next;
        }
    }
}

/// Presenter of the watch onboarding screen.
///
/// All asynchronous work runs on one task scope bound to the runtime the
/// presenter was created on, [`OnboardingPresenter::on_finish`] aborts it as a whole.
pub struct OnboardingPresenter {
    view: Arc<dyn OnboardingView>,
    authentication: Arc<dyn AuthenticationRepository>,
    urls: Arc<dyn UrlRepository>,
    inner: Arc<Mutex<Inner>>,
    scope: Mutex<JoinSet<()>>,
    handle: Handle,
}

impl OnboardingPresenter {
    /// Must be called from within a tokio runtime.
    pub fn new(
        view: Arc<dyn OnboardingView>,
        authentication: Arc<dyn AuthenticationRepository>,
        urls: Arc<dyn UrlRepository>,
    ) -> HassResult<Self> {
        let handle = Handle::try_current().map_err(|e| HassError::Generic(e.to_string()))?;
        Ok(OnboardingPresenter {
            view,
            authentication,
            urls,
            inner: Arc::new(Mutex::new(Inner {
                state: OnboardingState::Idle,
                instances: Vec::new(),
            })),
            scope: Mutex::new(JoinSet::new()),
            handle,
        })
    }

    pub fn state(&self) -> OnboardingState {
        self.inner.lock().state
    }

    /// Instances currently announced by the phone
    pub fn instances(&self) -> Vec<HomeAssistantInstance> {
        self.inner.lock().instances.clone()
    }

    /// Handles one batch of data channel notifications, in delivery order.
    pub fn on_data_changed(&self, events: &[DataEvent]) {
        if self.inner.lock().is_disposed() {
            return;
        }
        debug!("onDataChanged: [{}]", events.len());

        for event in events {
            if event.item.path != INSTANCE_PATH {
                continue;
            }
            let instance = match HomeAssistantInstance::from_data_map(&event.item.data) {
                Ok(instance) => instance,
                Err(err) => {
                    warn!("Skipping malformed home_assistant_instance: {}", err);
                    continue;
                }
            };

            match event.event_type {
                DataEventType::Changed => {
                    debug!("onDataChanged: found home_assistant_instance");
                    {
                        let mut inner = self.inner.lock();
                        inner.instances.retain(|known| known.url != instance.url);
                        inner.instances.push(instance.clone());
                    }
                    self.view.on_instance_found(instance);
                }
                DataEventType::Deleted => {
                    self.inner
                        .lock()
                        .instances
                        .retain(|known| known.url != instance.url);
                    self.view.on_instance_lost(instance);
                }
            }
        }

        let mut inner = self.inner.lock();
        let next = if inner.instances.is_empty() {
            OnboardingState::Idle
        } else {
            OnboardingState::Selecting
        };
        inner.transition(next);
    }

    /// Saves the instance url as the active server, then requests a new login flow.
    pub fn on_adapter_item_click(&self, instance: HomeAssistantInstance) {
        if self.inner.lock().is_disposed() {
            return;
        }
        info!("onAdapterItemClick: {}", instance.name);
        self.view.show_loading();
        self.inner.lock().transition(OnboardingState::LoggingIn);

        let view = self.view.clone();
        let authentication = self.authentication.clone();
        let urls = self.urls.clone();
        let inner = self.inner.clone();

        let mut scope = self.scope.lock();
        // reap tasks that already finished
        while scope.try_join_next().is_some() {}
        scope.spawn_on(
            async move {
                let result = login(urls.as_ref(), authentication.as_ref(), &instance).await;

                // held across the view call so on_finish cannot slip in between
                let mut inner = inner.lock();
                if inner.is_disposed() {
                    debug!("presenter finished, dropping login flow result");
                    return;
                }
                match result {
                    Ok(flow) => {
                        debug!("Created login flow step {}: {}", flow.step_id, flow.flow_id);
                        inner.state = OnboardingState::AuthenticationStarted;
                        view.start_authentication(&flow.flow_id);
                    }
                    Err(err) => {
                        error!("Unable to initiate login flow: {}", err);
                        inner.state = OnboardingState::ErrorShown;
                        view.show_error();
                    }
                }
            },
            &self.handle,
        );
    }

    /// Aborts every pending task, later calls are ignored.
    ///
    /// A task already past its last await when this runs sees the presenter
    /// disposed and leaves the view alone.
    pub fn on_finish(&self) {
        self.inner.lock().state = OnboardingState::Disposed;
        self.scope.lock().abort_all();
    }
}

async fn login(
    urls: &dyn UrlRepository,
    authentication: &dyn AuthenticationRepository,
    instance: &HomeAssistantInstance,
) -> HassResult<LoginFlowInit> {
    urls.save_url(instance.url.as_str()).await?;
    authentication.initiate_login_flow().await
}
