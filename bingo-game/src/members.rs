//! Cached clan roster snapshot.
use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RosterCachePolicy;
use crate::constants::DEFAULT_MEMBER_ROLE;
use crate::wom::WomRawMembership;

/// A clan member as the board tracks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    /// Identifier assigned by the roster provider.
    pub id: u64,
    /// Account category (regular, ironman, ...).
    #[serde(rename = "type")]
    pub account_type: String,
    pub role: String,
}

impl From<&WomRawMembership> for Member {
    fn from(raw: &WomRawMembership) -> Self {
        Self {
            name: raw.player.display_name.clone(),
            id: raw.player.id,
            account_type: raw.player.player_type.clone(),
            role: raw
                .role
                .clone()
                .unwrap_or_else(|| DEFAULT_MEMBER_ROLE.to_string()),
        }
    }
}

/// Time-stamped roster snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembersStorage {
    pub members: Vec<Member>,
    pub updated: DateTime<Utc>,
}

impl MembersStorage {
    #[must_use]
    pub const fn new(members: Vec<Member>, updated: DateTime<Utc>) -> Self {
        Self { members, updated }
    }

    /// Translate provider memberships. Repeated player ids keep their first entry.
    #[must_use]
    pub fn from_wom(memberships: &[WomRawMembership], updated: DateTime<Utc>) -> Self {
        let mut seen = HashSet::with_capacity(memberships.len());
        let members = memberships
            .iter()
            .filter(|raw| seen.insert(raw.player.id))
            .map(Member::from)
            .collect();
        Self { members, updated }
    }

    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.updated
    }

    /// A snapshot dated in the future counts as fresh.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, policy: &RosterCachePolicy) -> bool {
        self.age(now) > policy.max_age()
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn find_by_id(&self, id: u64) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wom::WomRawPlayer;
    use chrono::TimeZone;

    fn raw(id: u64, name: &str, role: Option<&str>) -> WomRawMembership {
        WomRawMembership {
            player_id: id,
            group_id: 42,
            role: role.map(str::to_string),
            created_at: None,
            updated_at: None,
            player: WomRawPlayer {
                id,
                username: name.to_lowercase(),
                display_name: name.to_string(),
                player_type: "ironman".to_string(),
                build: "main".to_string(),
                country: None,
                status: "active".to_string(),
                exp: 0,
                ehp: 0.0,
                ehb: 0.0,
                ttm: 0.0,
                tt200m: 0.0,
                registered_at: None,
                updated_at: None,
                last_changed_at: None,
                last_imported_at: None,
            },
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn translation_maps_fields_and_dedupes() {
        let raws = vec![
            raw(1, "Woox", Some("owner")),
            raw(2, "B0aty", None),
            raw(1, "Woox Alt", Some("member")),
        ];
        let storage = MembersStorage::from_wom(&raws, noon());
        assert_eq!(storage.len(), 2);
        let woox = storage.find_by_id(1).unwrap();
        assert_eq!(woox.name, "Woox");
        assert_eq!(woox.role, "owner");
        assert_eq!(woox.account_type, "ironman");
        assert_eq!(storage.find_by_name("b0aty").unwrap().role, "member");
        assert!(storage.find_by_name("nobody").is_none());
    }

    #[test]
    fn member_type_uses_wire_name() {
        let member = Member::from(&raw(3, "Settled", None));
        let value = serde_json::to_value(&member).unwrap();
        assert_eq!(value["type"], "ironman");
        assert!(value.get("account_type").is_none());
    }

    #[test]
    fn staleness_follows_policy() {
        let storage = MembersStorage::new(Vec::new(), noon());
        let policy = RosterCachePolicy { max_age_minutes: 60 };
        assert!(storage.is_empty());
        assert!(!storage.is_stale(noon() + Duration::minutes(60), &policy));
        assert!(storage.is_stale(noon() + Duration::minutes(61), &policy));
        assert!(!storage.is_stale(noon() - Duration::minutes(5), &policy));
    }
}
