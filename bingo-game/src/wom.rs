//! Raw WiseOldMan group-membership shapes.
//!
//! These only exist to be translated into [`crate::Member`] records; nothing
//! else in the crate reads them.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A player record as returned inside a group membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WomRawPlayer {
    pub id: u64,
    pub username: String,
    pub display_name: String,
    #[serde(rename = "type", default = "WomRawPlayer::default_type")]
    pub player_type: String,
    #[serde(default)]
    pub build: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub exp: i64,
    #[serde(default)]
    pub ehp: f64,
    #[serde(default)]
    pub ehb: f64,
    #[serde(default)]
    pub ttm: f64,
    #[serde(default)]
    pub tt200m: f64,
    #[serde(default)]
    pub registered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_changed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_imported_at: Option<DateTime<Utc>>,
}

impl WomRawPlayer {
    fn default_type() -> String {
        "unknown".to_string()
    }
}

/// One player's membership in a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WomRawMembership {
    pub player_id: u64,
    pub group_id: u64,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub player: WomRawPlayer,
}

impl WomRawMembership {
    /// Parse a group member list as served by the provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not a list of memberships.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_payload_and_ignores_extras() {
        let json = r#"[
            {
                "playerId": 1135,
                "groupId": 139,
                "role": "dragon",
                "createdAt": "2021-05-03T16:59:22.771Z",
                "updatedAt": "2023-01-13T19:16:41.316Z",
                "player": {
                    "id": 1135,
                    "username": "psikoi",
                    "displayName": "Psikoi",
                    "type": "regular",
                    "build": "main",
                    "country": "PT",
                    "status": "active",
                    "patron": true,
                    "exp": 447012453,
                    "ehp": 1026.4,
                    "ehb": 433.9,
                    "ttm": 301.2,
                    "tt200m": 14053.1,
                    "registeredAt": "2020-04-18T02:59:12.127Z",
                    "updatedAt": "2023-01-16T05:15:21.511Z",
                    "lastChangedAt": "2023-01-15T00:47:34.498Z",
                    "lastImportedAt": null
                }
            }
        ]"#;
        let list = WomRawMembership::list_from_json(json).unwrap();
        assert_eq!(list.len(), 1);
        let entry = &list[0];
        assert_eq!(entry.role.as_deref(), Some("dragon"));
        assert_eq!(entry.player.display_name, "Psikoi");
        assert_eq!(entry.player.player_type, "regular");
        assert_eq!(entry.player.country.as_deref(), Some("PT"));
        assert!(entry.player.last_imported_at.is_none());
    }

    #[test]
    fn minimal_player_fills_defaults() {
        let json = r#"{
            "playerId": 7,
            "groupId": 1,
            "player": { "id": 7, "username": "lynx titan", "displayName": "Lynx Titan" }
        }"#;
        let entry: WomRawMembership = serde_json::from_str(json).unwrap();
        assert!(entry.role.is_none());
        assert_eq!(entry.player.player_type, "unknown");
        assert_eq!(entry.player.exp, 0);
    }
}
