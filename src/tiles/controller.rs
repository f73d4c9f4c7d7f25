use super::{IconResolver, Notice, Notifier, Tile, TileHost};
use crate::repository::{IntegrationRepository, TileDao};
use crate::types::{entity_domain, TileData, TileState};
use crate::HassResult;

use log::{debug, error};
use serde_json::json;
use std::sync::Arc;

/// Domains whose entities report `on`/`off` and accept the `toggle` service
pub const TOGGLE_DOMAINS: [&str; 9] = [
    "cover",
    "fan",
    "humidifier",
    "input_boolean",
    "light",
    "media_player",
    "remote",
    "siren",
    "switch",
];

fn is_toggleable(entity_id: &str) -> bool {
    TOGGLE_DOMAINS.contains(&entity_domain(entity_id))
}

/// Paints quick settings tiles from their persisted mapping and fires the
/// entity's service when a tile is clicked
pub struct TileController {
    tile_dao: Arc<dyn TileDao>,
    integration: Arc<dyn IntegrationRepository>,
    icons: Arc<dyn IconResolver>,
    notifier: Arc<dyn Notifier>,
}

impl TileController {
    pub fn new(
        tile_dao: Arc<dyn TileDao>,
        integration: Arc<dyn IntegrationRepository>,
        icons: Arc<dyn IconResolver>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        TileController {
            tile_dao,
            integration,
            icons,
            notifier,
        }
    }

    pub async fn on_tile_added(&self, host: &mut dyn TileHost) {
        self.refresh(host).await;
    }

    pub async fn on_start_listening(&self, host: &mut dyn TileHost) {
        self.refresh(host).await;
    }

    pub async fn on_click(&self, host: &mut dyn TileHost) {
        let tile_id = host.tile_id().to_owned();
        if let Some(tile) = host.tile() {
            self.tile_clicked(&tile_id, tile).await;
        }
    }

    async fn refresh(&self, host: &mut dyn TileHost) {
        let tile_id = host.tile_id().to_owned();
        if let Some(tile) = host.tile() {
            self.set_tile_data(&tile_id, tile).await;
        }
    }

    /// Paints `tile` from its mapping, `false` when there is nothing to show.
    pub async fn set_tile_data(&self, tile_id: &str, tile: &mut dyn Tile) -> bool {
        self.paint_logged(tile_id, tile).await.is_some()
    }

    /// Repaints, then flips the tile Active while the service call runs and
    /// back to Inactive once it returned, whatever the outcome.
    pub async fn tile_clicked(&self, tile_id: &str, tile: &mut dyn Tile) {
        let Some(tile_data) = self.paint_logged(tile_id, tile).await else {
            tile.set_state(TileState::Unavailable);
            tile.update_tile();
            self.notifier.show(Notice::TileDataMissing);
            return;
        };

        tile.set_state(TileState::Active);
        tile.update_tile();

        let entity_id = tile_data.entity_id.as_str();
        let service = if is_toggleable(entity_id) {
            "toggle"
        } else {
            "turn_on"
        };
        if let Err(err) = self
            .integration
            .call_service(
                entity_domain(entity_id),
                service,
                json!({ "entity_id": entity_id }),
            )
            .await
        {
            error!("Unable to call service {} for {}: {}", service, entity_id, err);
            self.notifier.show(Notice::ServiceCallFailure);
        }

        tile.set_state(TileState::Inactive);
        tile.update_tile();
    }

    async fn paint_logged(&self, tile_id: &str, tile: &mut dyn Tile) -> Option<TileData> {
        match self.paint(tile_id, tile).await {
            Ok(data) => data,
            Err(err) => {
                error!("Unable to set tile data for {}: {}", tile_id, err);
                None
            }
        }
    }

    async fn paint(&self, tile_id: &str, tile: &mut dyn Tile) -> HassResult<Option<TileData>> {
        let Some(tile_data) = self.tile_dao.get(tile_id)? else {
            debug!("no tile data for {}", tile_id);
            tile.set_state(TileState::Unavailable);
            tile.update_tile();
            return Ok(None);
        };

        tile.set_label(&tile_data.label);
        tile.set_subtitle(tile_data.subtitle.as_deref());

        let state = if is_toggleable(&tile_data.entity_id) {
            let entity = self.integration.get_entity(&tile_data.entity_id).await?;
            if entity.state == "on" {
                TileState::Active
            } else {
                TileState::Inactive
            }
        } else {
            TileState::Inactive
        };
        tile.set_state(state);

        if let Some(icon_id) = tile_data.icon_id {
            if let Some(icon) = self.icons.resolve(icon_id)? {
                tile.set_icon(icon);
            }
        }

        tile.update_tile();
        Ok(Some(tile_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::TileStore;
    use crate::tiles::IconPack;
    use crate::types::{HassEntity, TileIcon};
    use crate::HassError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::Value;

    #[derive(Default)]
    struct RecordingTile {
        label: Option<String>,
        subtitle: Option<String>,
        icon: Option<TileIcon>,
        state: Option<TileState>,
        pushed: Vec<TileState>,
    }

    impl Tile for RecordingTile {
        fn set_label(&mut self, label: &str) {
            self.label = Some(label.to_owned());
        }

        fn set_subtitle(&mut self, subtitle: Option<&str>) {
            self.subtitle = subtitle.map(str::to_owned);
        }

        fn set_icon(&mut self, icon: TileIcon) {
            self.icon = Some(icon);
        }

        fn set_state(&mut self, state: TileState) {
            self.state = Some(state);
        }

        fn update_tile(&mut self) {
            if let Some(state) = self.state {
                self.pushed.push(state);
            }
        }
    }

    struct Host {
        id: String,
        tile: Option<RecordingTile>,
    }

    impl TileHost for Host {
        fn tile_id(&self) -> &str {
            &self.id
        }

        fn tile(&mut self) -> Option<&mut dyn Tile> {
            self.tile.as_mut().map(|t| t as &mut dyn Tile)
        }
    }

    struct FakeIntegration {
        state: String,
        fail_calls: bool,
        fail_lookup: bool,
        calls: Mutex<Vec<(String, String, Value)>>,
    }

    impl FakeIntegration {
        fn with_state(state: &str) -> Self {
            FakeIntegration {
                state: state.to_owned(),
                fail_calls: false,
                fail_lookup: false,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl IntegrationRepository for FakeIntegration {
        async fn get_entity(&self, entity_id: &str) -> HassResult<HassEntity> {
            if self.fail_lookup {
                return Err(HassError::ConnectionClosed);
            }
            Ok(HassEntity {
                entity_id: entity_id.to_owned(),
                state: self.state.clone(),
                last_changed: String::new(),
                last_updated: String::new(),
                attributes: Default::default(),
                context: None,
            })
        }

        async fn call_service(
            &self,
            domain: &str,
            service: &str,
            service_data: Value,
        ) -> HassResult<()> {
            self.calls
                .lock()
                .push((domain.to_owned(), service.to_owned(), service_data));
            if self.fail_calls {
                return Err(HassError::Generic("service unavailable".to_owned()));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeNotifier {
        shown: Mutex<Vec<Notice>>,
    }

    impl Notifier for FakeNotifier {
        fn show(&self, notice: Notice) {
            self.shown.lock().push(notice);
        }
    }

    struct StaticIcons;

    impl IconResolver for StaticIcons {
        fn resolve(&self, icon_id: u32) -> HassResult<Option<TileIcon>> {
            let pack = IconPack::new([TileIcon {
                id: 62,
                name: "lightbulb".to_owned(),
                path: String::new(),
            }]);
            Ok(pack.get(icon_id).cloned())
        }
    }

    struct BrokenIcons;

    impl IconResolver for BrokenIcons {
        fn resolve(&self, _icon_id: u32) -> HassResult<Option<TileIcon>> {
            Err(HassError::Generic("icon pack missing".to_owned()))
        }
    }

    fn store_with(entity_id: &str) -> Arc<TileStore> {
        let store = TileStore::in_memory();
        store
            .upsert(TileData {
                id: 1,
                tile_id: "tile_1".to_owned(),
                icon_id: Some(62),
                entity_id: entity_id.to_owned(),
                label: "Kitchen".to_owned(),
                subtitle: Some("Ceiling".to_owned()),
            })
            .unwrap();
        Arc::new(store)
    }

    fn controller(
        store: Arc<TileStore>,
        integration: Arc<FakeIntegration>,
        notifier: Arc<FakeNotifier>,
    ) -> TileController {
        TileController::new(store, integration, Arc::new(StaticIcons), notifier)
    }

    #[tokio::test]
    async fn missing_mapping_is_unavailable() {
        let controller = controller(
            Arc::new(TileStore::in_memory()),
            Arc::new(FakeIntegration::with_state("on")),
            Arc::new(FakeNotifier::default()),
        );
        let mut tile = RecordingTile::default();

        assert!(!controller.set_tile_data("tile_1", &mut tile).await);
        assert_eq!(tile.pushed, vec![TileState::Unavailable]);
        assert!(tile.label.is_none());
    }

    #[tokio::test]
    async fn light_reflects_live_state() {
        for (live, expected) in [
            ("on", TileState::Active),
            ("off", TileState::Inactive),
            ("unavailable", TileState::Inactive),
        ] {
            let controller = controller(
                store_with("light.kitchen"),
                Arc::new(FakeIntegration::with_state(live)),
                Arc::new(FakeNotifier::default()),
            );
            let mut tile = RecordingTile::default();

            assert!(controller.set_tile_data("tile_1", &mut tile).await);
            assert_eq!(tile.state, Some(expected), "live state {}", live);
            assert_eq!(tile.label.as_deref(), Some("Kitchen"));
            assert_eq!(tile.subtitle.as_deref(), Some("Ceiling"));
            assert_eq!(tile.icon.as_ref().map(|i| i.id), Some(62));
        }
    }

    #[tokio::test]
    async fn scene_is_always_inactive() {
        let controller = controller(
            store_with("scene.movie_night"),
            Arc::new(FakeIntegration::with_state("on")),
            Arc::new(FakeNotifier::default()),
        );
        let mut tile = RecordingTile::default();

        assert!(controller.set_tile_data("tile_1", &mut tile).await);
        assert_eq!(tile.state, Some(TileState::Inactive));
    }

    #[tokio::test]
    async fn lookup_failure_reads_as_no_data() {
        let mut integration = FakeIntegration::with_state("on");
        integration.fail_lookup = true;
        let controller = controller(
            store_with("switch.heater"),
            Arc::new(integration),
            Arc::new(FakeNotifier::default()),
        );
        let mut tile = RecordingTile::default();

        assert!(!controller.set_tile_data("tile_1", &mut tile).await);
    }

    #[tokio::test]
    async fn icon_failure_reads_as_no_data() {
        let controller = TileController::new(
            store_with("scene.movie_night"),
            Arc::new(FakeIntegration::with_state("on")),
            Arc::new(BrokenIcons),
            Arc::new(FakeNotifier::default()),
        );
        let mut tile = RecordingTile::default();

        assert!(!controller.set_tile_data("tile_1", &mut tile).await);
    }

    #[tokio::test]
    async fn click_toggles_and_flips_back() {
        let integration = Arc::new(FakeIntegration::with_state("off"));
        let notifier = Arc::new(FakeNotifier::default());
        let controller = controller(
            store_with("light.kitchen"),
            integration.clone(),
            notifier.clone(),
        );
        let mut tile = RecordingTile::default();

        controller.tile_clicked("tile_1", &mut tile).await;

        assert_eq!(
            tile.pushed,
            vec![TileState::Inactive, TileState::Active, TileState::Inactive]
        );
        assert_eq!(
            *integration.calls.lock(),
            vec![(
                "light".to_owned(),
                "toggle".to_owned(),
                json!({"entity_id": "light.kitchen"})
            )]
        );
        assert!(notifier.shown.lock().is_empty());
    }

    #[tokio::test]
    async fn click_on_scene_turns_it_on() {
        let integration = Arc::new(FakeIntegration::with_state("scening"));
        let controller = controller(
            store_with("scene.movie_night"),
            integration.clone(),
            Arc::new(FakeNotifier::default()),
        );
        let mut tile = RecordingTile::default();

        controller.tile_clicked("tile_1", &mut tile).await;

        let calls = integration.calls.lock();
        assert_eq!(calls[0].0, "scene");
        assert_eq!(calls[0].1, "turn_on");
        assert_eq!(calls[0].2, json!({"entity_id": "scene.movie_night"}));
    }

    #[tokio::test]
    async fn failed_call_still_flips_back() {
        let mut integration = FakeIntegration::with_state("on");
        integration.fail_calls = true;
        let notifier = Arc::new(FakeNotifier::default());
        let controller = controller(
            store_with("switch.heater"),
            Arc::new(integration),
            notifier.clone(),
        );
        let mut tile = RecordingTile::default();

        controller.tile_clicked("tile_1", &mut tile).await;

        assert_eq!(
            tile.pushed,
            vec![TileState::Active, TileState::Active, TileState::Inactive]
        );
        assert_eq!(*notifier.shown.lock(), vec![Notice::ServiceCallFailure]);
    }

    #[tokio::test]
    async fn click_without_mapping_warns() {
        let integration = Arc::new(FakeIntegration::with_state("on"));
        let notifier = Arc::new(FakeNotifier::default());
        let controller = controller(
            Arc::new(TileStore::in_memory()),
            integration.clone(),
            notifier.clone(),
        );
        let mut tile = RecordingTile::default();

        controller.tile_clicked("tile_1", &mut tile).await;

        assert_eq!(tile.state, Some(TileState::Unavailable));
        assert!(integration.calls.lock().is_empty());
        assert_eq!(*notifier.shown.lock(), vec![Notice::TileDataMissing]);
    }

    #[tokio::test]
    async fn host_without_tile_is_ignored() {
        let integration = Arc::new(FakeIntegration::with_state("on"));
        let controller = controller(
            store_with("light.kitchen"),
            integration.clone(),
            Arc::new(FakeNotifier::default()),
        );
        let mut host = Host {
            id: "tile_1".to_owned(),
            tile: None,
        };

        controller.on_click(&mut host).await;
        assert!(integration.calls.lock().is_empty());

        host.tile = Some(RecordingTile::default());
        controller.on_start_listening(&mut host).await;
        let tile = host.tile.as_ref().unwrap();
        assert_eq!(tile.state, Some(TileState::Active));
    }
}
