use hass_companion::repository::{HttpAuthenticationRepository, MemoryUrlRepository};
use hass_companion::types::{
    CompanionConfig, DataEvent, DataMap, HomeAssistantInstance, INSTANCE_PATH,
};
use hass_companion::wear::{OnboardingPresenter, OnboardingView};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

enum Outcome {
    Flow(String),
    Failed,
}

struct ConsoleView(UnboundedSender<Outcome>);

impl OnboardingView for ConsoleView {
    fn on_instance_found(&self, instance: HomeAssistantInstance) {
        println!("found {} ({}) at {}", instance.name, instance.version, instance.url);
    }

    fn on_instance_lost(&self, instance: HomeAssistantInstance) {
        println!("lost {}", instance.name);
    }

    fn show_loading(&self) {
        println!("loading...");
    }

    fn start_authentication(&self, flow_id: &str) {
        let _ = self.0.send(Outcome::Flow(flow_id.to_owned()));
    }

    fn show_error(&self) {
        let _ = self.0.send(Outcome::Failed);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = CompanionConfig::from_env()?;
    let urls = Arc::new(MemoryUrlRepository::new());
    let auth = Arc::new(HttpAuthenticationRepository::new(&config, urls.clone()));
    let (tx, mut rx) = unbounded_channel();
    let presenter = OnboardingPresenter::new(Arc::new(ConsoleView(tx)), auth, urls)?;

    // what the phone would broadcast over the data layer
    let map: DataMap = [
        ("name", "Home"),
        ("url", config.server_url.as_str()),
        ("version", "unknown"),
    ]
    .into_iter()
    .collect();
    presenter.on_data_changed(&[DataEvent::changed(INSTANCE_PATH, map)]);

    for instance in presenter.instances() {
        presenter.on_adapter_item_click(instance);
    }

    match rx.recv().await {
        Some(Outcome::Flow(flow_id)) => println!("login flow started: {}", flow_id),
        Some(Outcome::Failed) => println!("unable to start the login flow"),
        None => {}
    }

    presenter.on_finish();
    Ok(())
}
