use serde::{Deserialize, Serialize};

/// This object represents the Home Assistant Entity
///
/// [Entity](https://developers.home-assistant.io/docs/core/entity/)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HassEntity {
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub last_changed: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub attributes: HassEntityAttributeBase,
    pub context: Option<Context>,
}

impl HassEntity {
    /// The domain part of the entity id, `light` for `light.kitchen`
    pub fn domain(&self) -> &str {
        entity_domain(&self.entity_id)
    }
}

///	This is part of HassEntity
///
/// Integrations leave most of these out or send them as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HassEntityAttributeBase {
    pub friendly_name: Option<String>,
    pub icon: Option<String>,
    pub supported_features: Option<u32>,
    #[serde(default)]
    pub assumed_state: bool,
    pub device_class: Option<String>,
}

/// General construct used by HassEntity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Context {
    pub id: String,
    pub parent_id: Option<String>,
    pub user_id: Option<String>,
}

/// Returns everything before the first `.` of an entity id.
pub fn entity_domain(entity_id: &str) -> &str {
    entity_id.split('.').next().unwrap_or(entity_id)
}
