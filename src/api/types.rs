// SPDX-License-Identifier: MPL-2.0
//! Wire types for the survivor directory REST API.
//!
//! Field names follow the backend's JSON conventions: survivor fields use
//! camelCase (`lastLocation`, `infectionReports`) while nested resources
//! use snake_case. Serde rename attributes keep the Rust side idiomatic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Survivor gender as encoded by the backend (`"m"` / `"f"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

impl Gender {
    /// All variants, in pick-list order.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// A survivor's last known coordinates.
///
/// `distance` is only populated on list responses when the caller supplied
/// an identity, and expresses kilometers from the caller's own location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// A tradable item from the shared catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub label: String,
    pub worth: u32,
}

/// Item id to quantity.
pub type Inventory = HashMap<String, u32>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfectionReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub reporter_id: String,
    pub reported_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survivor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    #[serde(rename = "lastLocation")]
    pub last_location: LatLon,
    pub inventory: Inventory,
    #[serde(rename = "infectionReports", default)]
    pub infection_reports: Vec<InfectionReport>,
}

impl Survivor {
    /// Number of distinct infection reports filed against this survivor.
    pub fn report_count(&self) -> usize {
        self.infection_reports.len()
    }
}

/// Payload for registering a new survivor.
#[derive(Debug, Clone, Serialize)]
pub struct NewSurvivor {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    #[serde(rename = "lastLocation")]
    pub last_location: LatLon,
    pub inventory: Inventory,
}

/// One side of a trade: whose inventory, and which items leave it.
#[derive(Debug, Clone, Serialize)]
pub struct TradeSide {
    pub survivor_id: String,
    pub items: Inventory,
}

/// Full trade payload; the backend validates that both sides' worth match.
#[derive(Debug, Clone, Serialize)]
pub struct TradeRequest {
    pub survivor_a_items: TradeSide,
    pub survivor_b_items: TradeSide,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survivor_deserializes_from_backend_json() {
        let payload = r#"{
            "id": "a1b2",
            "name": "Jane Smith",
            "age": 25,
            "gender": "f",
            "lastLocation": {
                "id": "loc2",
                "latitude": 40.7128,
                "longitude": -74.006,
                "distance": 12.5
            },
            "inventory": { "water-id": 2, "ammo-id": 1 },
            "infectionReports": [
                {
                    "id": "ir1",
                    "reporter_id": "r1",
                    "reported_id": "a1b2",
                    "created_at": "2024-03-01T12:00:00Z"
                }
            ]
        }"#;

        let survivor: Survivor = serde_json::from_str(payload).expect("valid survivor JSON");
        assert_eq!(survivor.name, "Jane Smith");
        assert_eq!(survivor.gender, Gender::Female);
        assert_eq!(survivor.last_location.distance, Some(12.5));
        assert_eq!(survivor.inventory.get("water-id"), Some(&2));
        assert_eq!(survivor.report_count(), 1);
    }

    #[test]
    fn survivor_tolerates_missing_optional_fields() {
        let payload = r#"{
            "name": "John Doe",
            "age": 30,
            "gender": "m",
            "lastLocation": { "latitude": 34.0522, "longitude": -118.2437 },
            "inventory": {}
        }"#;

        let survivor: Survivor = serde_json::from_str(payload).expect("valid survivor JSON");
        assert!(survivor.id.is_none());
        assert!(survivor.infection_reports.is_empty());
    }

    #[test]
    fn new_survivor_serializes_with_camel_case_location() {
        let new_survivor = NewSurvivor {
            name: "Alice".to_string(),
            age: 28,
            gender: Gender::Female,
            last_location: LatLon {
                id: None,
                latitude: 37.7749,
                longitude: -122.4194,
                distance: None,
            },
            inventory: Inventory::new(),
        };

        let json = serde_json::to_value(&new_survivor).expect("serializable");
        assert!(json.get("lastLocation").is_some());
        assert_eq!(json["gender"], "f");
        assert!(json["lastLocation"].get("distance").is_none());
    }

    #[test]
    fn trade_request_matches_backend_payload_shape() {
        let request = TradeRequest {
            survivor_a_items: TradeSide {
                survivor_id: "a".to_string(),
                items: Inventory::from([("water".to_string(), 1)]),
            },
            survivor_b_items: TradeSide {
                survivor_id: "b".to_string(),
                items: Inventory::from([("ammo".to_string(), 4)]),
            },
        };

        let json = serde_json::to_value(&request).expect("serializable");
        assert_eq!(json["survivor_a_items"]["survivor_id"], "a");
        assert_eq!(json["survivor_b_items"]["items"]["ammo"], 4);
    }
}
