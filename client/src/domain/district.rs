//! Serviceable delivery district reference data.

use serde::{Deserialize, Serialize};

/// A delivery zone with a daily order capacity.
///
/// Read-only reference data: the client uses districts to populate the
/// new-address selection list and to tag the address; the capacity itself is
/// enforced by the backend when it assigns delivery dates.
///
/// The wire payload names the district `district`, not `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    /// Backend-assigned identifier.
    pub id: i64,
    /// District name shown in the selection list.
    #[serde(rename = "district")]
    pub name: String,
    /// Orders deliverable per day in this district.
    pub max_per_day: u32,
    /// Whether the district currently accepts orders.
    pub is_active: bool,
}
