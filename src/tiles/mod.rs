//! Quick settings tiles bound to a single entity

mod controller;
mod icons;

pub use controller::{TileController, TOGGLE_DOMAINS};
pub use icons::{IconPack, IconPackLoader, IconResolver, JsonIconPackLoader, LazyIconPack};

use crate::types::{TileIcon, TileState};

/// Handle to the system tile, every mutation is pushed with [`Tile::update_tile`]
pub trait Tile: Send {
    fn set_label(&mut self, label: &str);
    fn set_subtitle(&mut self, subtitle: Option<&str>);
    fn set_icon(&mut self, icon: TileIcon);
    fn set_state(&mut self, state: TileState);
    fn update_tile(&mut self);
}

/// The tile service slot that owns one tile
pub trait TileHost: Send {
    fn tile_id(&self) -> &str;

    /// `None` while the system has not bound a tile yet
    fn tile(&mut self) -> Option<&mut dyn Tile>;
}

/// Short user facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ServiceCallFailure,
    TileDataMissing,
}

impl Notice {
    pub fn text(&self) -> &'static str {
        match self {
            Notice::ServiceCallFailure => "Unable to send service call to Home Assistant",
            Notice::TileDataMissing => {
                "Tile data is missing, please set up the tile in the app settings"
            }
        }
    }
}

/// Transient notification surface (toast)
pub trait Notifier: Send + Sync {
    fn show(&self, notice: Notice);
}
