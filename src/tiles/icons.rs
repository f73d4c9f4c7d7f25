use crate::types::TileIcon;
use crate::HassResult;

use log::debug;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Turns a stored icon id into something the tile can display
pub trait IconResolver: Send + Sync {
    fn resolve(&self, icon_id: u32) -> HassResult<Option<TileIcon>>;
}

/// Every icon the tiles may show, keyed by icon id
#[derive(Debug, Default)]
pub struct IconPack {
    icons: HashMap<u32, TileIcon>,
}

impl IconPack {
    pub fn new(icons: impl IntoIterator<Item = TileIcon>) -> Self {
        IconPack {
            icons: icons.into_iter().map(|icon| (icon.id, icon)).collect(),
        }
    }

    pub fn get(&self, icon_id: u32) -> Option<&TileIcon> {
        self.icons.get(&icon_id)
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

pub trait IconPackLoader: Send + Sync {
    fn load(&self) -> HassResult<IconPack>;
}

/// Reads a JSON array of `{"id", "name", "path"}` icons
#[derive(Debug, Clone)]
pub struct JsonIconPackLoader {
    path: PathBuf,
}

impl JsonIconPackLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonIconPackLoader { path: path.into() }
    }
}

impl IconPackLoader for JsonIconPackLoader {
    fn load(&self) -> HassResult<IconPack> {
        let content = fs::read_to_string(&self.path)?;
        let icons: Vec<TileIcon> = serde_json::from_str(&content)?;
        Ok(IconPack::new(icons))
    }
}

/// Icon pack built on first use and kept for the lifetime of its owner.
///
/// A failed load is not cached, the next resolve tries again.
pub struct LazyIconPack<L> {
    loader: L,
    pack: OnceCell<IconPack>,
}

impl<L: IconPackLoader> LazyIconPack<L> {
    pub fn new(loader: L) -> Self {
        LazyIconPack {
            loader,
            pack: OnceCell::new(),
        }
    }

    fn pack(&self) -> HassResult<&IconPack> {
        self.pack.get_or_try_init(|| {
            let pack = self.loader.load()?;
            debug!("icon pack loaded with {} icons", pack.len());
            Ok(pack)
        })
    }
}

impl<L: IconPackLoader> IconResolver for LazyIconPack<L> {
    fn resolve(&self, icon_id: u32) -> HassResult<Option<TileIcon>> {
        Ok(self.pack()?.get(icon_id).cloned())
    }
}
