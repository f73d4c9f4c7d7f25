use super::TileDao;
use crate::types::TileData;
use crate::HassResult;

use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Tile mappings keyed by tile id, optionally mirrored to a JSON file
#[derive(Debug, Default)]
pub struct TileStore {
    path: Option<PathBuf>,
    tiles: RwLock<HashMap<String, TileData>>,
}

impl TileStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads the store from `path`, a missing file starts an empty store.
    pub fn open(path: impl AsRef<Path>) -> HassResult<Self> {
        let path = path.as_ref().to_path_buf();
        let tiles = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let list: Vec<TileData> = serde_json::from_str(&content)?;
            list.into_iter().map(|t| (t.tile_id.clone(), t)).collect()
        } else {
            HashMap::new()
        };
        debug!("loaded {} tiles from {}", tiles.len(), path.display());

        Ok(TileStore {
            path: Some(path),
            tiles: RwLock::new(tiles),
        })
    }

    /// Memory is only changed once the file write succeeded.
    pub fn upsert(&self, tile: TileData) -> HassResult<()> {
        let mut tiles = self.tiles.write();
        let previous = tiles.insert(tile.tile_id.clone(), tile.clone());
        if let Err(err) = self.persist(&tiles) {
            match previous {
                Some(previous) => tiles.insert(tile.tile_id, previous),
                None => tiles.remove(&tile.tile_id),
            };
            return Err(err);
        }
        Ok(())
    }

    pub fn remove(&self, tile_id: &str) -> HassResult<Option<TileData>> {
        let mut tiles = self.tiles.write();
        let removed = tiles.remove(tile_id);
        if let Err(err) = self.persist(&tiles) {
            if let Some(removed) = removed {
                tiles.insert(removed.tile_id.clone(), removed);
            }
            return Err(err);
        }
        Ok(removed)
    }

    // called with the write guard held, writers are serialised on it
    fn persist(&self, tiles: &HashMap<String, TileData>) -> HassResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut list: Vec<&TileData> = tiles.values().collect();
        list.sort_by(|a, b| a.tile_id.cmp(&b.tile_id));
        fs::write(path, serde_json::to_string_pretty(&list)?)?;
        Ok(())
    }
}

impl TileDao for TileStore {
    fn get(&self, tile_id: &str) -> HassResult<Option<TileData>> {
        Ok(self.tiles.read().get(tile_id).cloned())
    }
}
