use hass_companion::repository::{HassIntegrationRepository, TileStore};
use hass_companion::tiles::{
    IconPack, IconPackLoader, LazyIconPack, Notice, Notifier, Tile, TileController, TileHost,
};
use hass_companion::types::{CompanionConfig, TileData, TileIcon, TileState};
use hass_companion::HassResult;
use lazy_static::lazy_static;
use std::env::var;
use std::sync::Arc;

lazy_static! {
    static ref ENTITY_ID: String = var("HASS_ENTITY").unwrap_or_else(|_| "light.kitchen".to_owned());
}

struct BuiltinIcons;

impl IconPackLoader for BuiltinIcons {
    fn load(&self) -> HassResult<IconPack> {
        Ok(IconPack::new([TileIcon {
            id: 62,
            name: "lightbulb".to_owned(),
            path: "M12,2A7,7 0 0,0 5,9C5,11.38 6.19,13.47 8,14.74V17A1,1 0 0,0 9,18H15A1,1 0 0,0 16,17V14.74C17.81,13.47 19,11.38 19,9A7,7 0 0,0 12,2Z".to_owned(),
        }]))
    }
}

#[derive(Default)]
struct ConsoleTile {
    label: String,
    state: Option<TileState>,
}

impl Tile for ConsoleTile {
    fn set_label(&mut self, label: &str) {
        self.label = label.to_owned();
    }

    fn set_subtitle(&mut self, _subtitle: Option<&str>) {}

    fn set_icon(&mut self, icon: TileIcon) {
        println!("icon: {}", icon.name);
    }

    fn set_state(&mut self, state: TileState) {
        self.state = Some(state);
    }

    fn update_tile(&mut self) {
        println!("tile [{}] -> {:?}", self.label, self.state);
    }
}

struct QuickSettingsSlot {
    tile: ConsoleTile,
}

impl TileHost for QuickSettingsSlot {
    fn tile_id(&self) -> &str {
        "demo_tile"
    }

    fn tile(&mut self) -> Option<&mut dyn Tile> {
        Some(&mut self.tile)
    }
}

struct PrintNotifier;

impl Notifier for PrintNotifier {
    fn show(&self, notice: Notice) {
        println!("toast: {}", notice.text());
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = CompanionConfig::from_env()?;
    println!("Connecting to - {}", config.websocket_url()?);
    let integration = HassIntegrationRepository::connect(&config).await?;

    let tiles = TileStore::in_memory();
    tiles.upsert(TileData {
        id: 1,
        tile_id: "demo_tile".to_owned(),
        icon_id: Some(62),
        entity_id: ENTITY_ID.clone(),
        label: ENTITY_ID.clone(),
        subtitle: None,
    })?;

    let controller = TileController::new(
        Arc::new(tiles),
        Arc::new(integration),
        Arc::new(LazyIconPack::new(BuiltinIcons)),
        Arc::new(PrintNotifier),
    );

    let mut slot = QuickSettingsSlot {
        tile: ConsoleTile::default(),
    };

    println!("Tile added:");
    controller.on_tile_added(&mut slot).await;

    println!("Tile clicked:");
    controller.on_click(&mut slot).await;

    tokio::time::sleep(std::time::Duration::from_secs(1)).await;

    println!("Listening again:");
    controller.on_start_listening(&mut slot).await;

    Ok(())
}
