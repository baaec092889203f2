use crate::domain::restaurant::{Address, GradeEntry, RestaurantRepr};
use crate::storage::documents::RestaurantStore;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub store: RestaurantStore,
}

/// Recognized list query parameters. Anything else on the query string is
/// silently ignored.
#[derive(Deserialize, Debug, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub borough: Option<String>,
}

/// Create payload. The required fields are `Option` so the handler can report
/// which one is missing; presence is the only check (empty strings pass).
#[derive(Deserialize, Debug, ToSchema)]
pub struct CreateRestaurantRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub borough: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub grades: Option<Vec<GradeEntry>>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// Update payload. `id` must match the path id; only the updatable fields are
/// recognized, and only those present end up in the partial update.
#[derive(Deserialize, Debug, ToSchema)]
pub struct UpdateRestaurantRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub borough: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RestaurantList {
    pub restaurants: Vec<RestaurantRepr>,
}

/// Generic error body (`{"message": ...}`).
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}
