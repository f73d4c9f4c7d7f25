use serde::{Deserialize, Serialize};

/// Persisted mapping between a quick settings tile and the entity it drives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TileData {
    #[serde(default)]
    pub id: u32,
    pub tile_id: String,
    #[serde(default)]
    pub icon_id: Option<u32>,
    pub entity_id: String,
    pub label: String,
    #[serde(default)]
    pub subtitle: Option<String>,
}

/// Activation state shown by the system tile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TileState {
    Active,
    Inactive,
    Unavailable,
}

/// A resolved icon from the icon pack, `path` holds the SVG path data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TileIcon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub path: String,
}
