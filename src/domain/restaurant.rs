//! The restaurant record and its public projection.
//!
//! The stored document is the plain serde shape below; the store-assigned id
//! lives beside it (see `storage::documents::StoredRestaurant`). Everything
//! derived (`address_string`, `most_recent_grade`, the API representation) is
//! computed on read by free functions — nothing derived is ever persisted and
//! the record type carries no behavior of its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Structured street address. All fields optional; `coord` keeps the
/// longitude/latitude pair as raw text tokens, exactly as submitted.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, ToSchema)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coord: Vec<String>,
}

/// One inspection grade entry.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct GradeEntry {
    pub date: DateTime<Utc>,
    pub grade: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// The stored restaurant document.
///
/// `name`, `borough` and `cuisine` are required at creation time only; records
/// read back from the store are deserialized leniently so older or
/// hand-inserted documents with missing fields still project cleanly.
#[derive(Clone, Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct Restaurant {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub borough: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub grades: Vec<GradeEntry>,
}

/// Client-facing projection. Internal fields (`grades`, the structured
/// address) are never exposed; `address` here is the derived display string.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RestaurantRepr {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub borough: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    pub address: String,
}

/// Trimmed `"building street"` concatenation of the structured address.
pub fn address_string(address: &Address) -> String {
    let building = address.building.as_deref().unwrap_or("");
    let street = address.street.as_deref().unwrap_or("");
    format!("{} {}", building, street).trim().to_string()
}

/// Grade of the most recently dated entry, `None` when there are no grades.
///
/// Re-sorts a copy descending by date on every call. The sort is stable, so
/// entries sharing the maximum date resolve to the earliest one in original
/// document order.
pub fn most_recent_grade(grades: &[GradeEntry]) -> Option<String> {
    let mut sorted: Vec<&GradeEntry> = grades.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.first().map(|entry| entry.grade.clone())
}

/// Produces the public representation of a stored record.
pub fn api_repr(id: &str, restaurant: &Restaurant) -> RestaurantRepr {
    RestaurantRepr {
        id: id.to_string(),
        name: restaurant.name.clone(),
        cuisine: restaurant.cuisine.clone(),
        borough: restaurant.borough.clone(),
        grade: most_recent_grade(&restaurant.grades),
        address: address_string(&restaurant.address),
    }
}
