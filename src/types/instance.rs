use crate::HassResult;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Data channel path on which the phone broadcasts its Home Assistant instance
pub const INSTANCE_PATH: &str = "/home_assistant_instance";

/// A Home Assistant server announced by the paired phone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HomeAssistantInstance {
    pub name: String,
    pub url: Url,
    pub version: String,
}

impl HomeAssistantInstance {
    /// Reads the `name`, `url` and `version` keys, missing keys read as empty strings.
    pub fn from_data_map(map: &DataMap) -> HassResult<Self> {
        Ok(HomeAssistantInstance {
            name: map.get_string("name", ""),
            url: Url::parse(&map.get_string("url", ""))?,
            version: map.get_string("version", ""),
        })
    }
}

/// String keyed payload of a data item
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DataMap(HashMap<String, String>);

impl DataMap {
    pub fn new() -> Self {
        DataMap(HashMap::new())
    }

    pub fn put_string(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_owned(), value.to_owned());
    }

    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.0
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_owned())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DataMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        DataMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DataEventType {
    Changed,
    Deleted,
}

/// A data item as synced over the device pairing channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataItem {
    pub path: String,
    pub data: DataMap,
}

/// One change notification of a data event batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataEvent {
    pub event_type: DataEventType,
    pub item: DataItem,
}

impl DataEvent {
    pub fn changed(path: &str, data: DataMap) -> Self {
        DataEvent {
            event_type: DataEventType::Changed,
            item: DataItem {
                path: path.to_owned(),
                data,
            },
        }
    }

    pub fn deleted(path: &str, data: DataMap) -> Self {
        DataEvent {
            event_type: DataEventType::Deleted,
            item: DataItem {
                path: path.to_owned(),
                data,
            },
        }
    }
}
