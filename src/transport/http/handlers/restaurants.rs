//! The five restaurant CRUD handlers.
//!
//! Each handler is a straight-line sequence: validate a few keys, issue
//! exactly one store operation, project the result. Backend failures all
//! collapse into the shared 500 responder; missing documents are answered
//! with 404 before projection is attempted.

use crate::domain::restaurant::{api_repr, Restaurant};
use crate::storage::documents::ListFilter;
use crate::transport::http::handlers::common::{internal_error, not_found};
use crate::transport::http::types::{
    AppState, CreateRestaurantRequest, ListQuery, RestaurantList,
    UpdateRestaurantRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Fixed result cap for listings. No pagination beyond this.
const LIST_LIMIT: i64 = 10;

#[utoipa::path(
    get,
    path = "/restaurants",
    params(
        ("cuisine" = Option<String>, Query, description = "Exact-match cuisine filter"),
        ("borough" = Option<String>, Query, description = "Exact-match borough filter")
    ),
    responses(
        (status = 200, description = "Matching restaurants (at most 10)", body = RestaurantList),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let filter = ListFilter {
        cuisine: query.cuisine,
        borough: query.borough,
    };
    match state.store.find(&filter, LIST_LIMIT).await {
        Ok(stored) => {
            let restaurants = stored
                .iter()
                .map(|s| api_repr(&s.id, &s.restaurant))
                .collect();
            (StatusCode::OK, Json(RestaurantList { restaurants })).into_response()
        }
        Err(e) => internal_error(e),
    }
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Public representation", body = RestaurantRepr),
        (status = 404, description = "No such restaurant", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.find_by_id(&id).await {
        Ok(Some(stored)) => {
            (StatusCode::OK, Json(api_repr(&stored.id, &stored.restaurant))).into_response()
        }
        Ok(None) => not_found(),
        Err(e) => internal_error(e),
    }
}

#[utoipa::path(
    post,
    path = "/restaurants",
    request_body = CreateRestaurantRequest,
    responses(
        (status = 201, description = "Created", body = RestaurantRepr),
        (status = 400, description = "Missing required field"),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn create_handler(
    State(state): State<AppState>,
    body: Result<Json<CreateRestaurantRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(v) => v,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", e))
                .into_response();
        }
    };

    // Presence check only, in fixed order; empty strings pass.
    let required = [
        ("name", &body.name),
        ("borough", &body.borough),
        ("cuisine", &body.cuisine),
    ];
    for (field, value) in required {
        if value.is_none() {
            return (StatusCode::BAD_REQUEST, format!("Missing field: {}", field))
                .into_response();
        }
    }

    let restaurant = Restaurant {
        name: body.name.unwrap_or_default(),
        borough: body.borough.unwrap_or_default(),
        cuisine: body.cuisine.unwrap_or_default(),
        grades: body.grades.unwrap_or_default(),
        address: body.address.unwrap_or_default(),
    };

    match state.store.create(&restaurant).await {
        Ok(stored) => (
            StatusCode::CREATED,
            Json(api_repr(&stored.id, &stored.restaurant)),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}

#[utoipa::path(
    put,
    path = "/restaurants/{id}",
    params(("id" = String, Path, description = "Restaurant id")),
    request_body = UpdateRestaurantRequest,
    responses(
        (status = 202, description = "Updated", body = RestaurantRepr),
        (status = 400, description = "Path/body id mismatch"),
        (status = 404, description = "No such restaurant", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateRestaurantRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(v) => v,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", e))
                .into_response();
        }
    };

    if body.id.as_deref() != Some(id.as_str()) {
        return (
            StatusCode::BAD_REQUEST,
            format!(
                "Request path id ({}) and request body id ({}) must match",
                id,
                body.id.as_deref().unwrap_or("<missing>")
            ),
        )
            .into_response();
    }

    // Allow-list: explicit iteration over the fixed field set. Only fields
    // present in the body enter the partial update.
    let mut patch = JsonMap::new();
    if let Some(name) = body.name {
        patch.insert("name".to_string(), JsonValue::String(name));
    }
    if let Some(borough) = body.borough {
        patch.insert("borough".to_string(), JsonValue::String(borough));
    }
    if let Some(cuisine) = body.cuisine {
        patch.insert("cuisine".to_string(), JsonValue::String(cuisine));
    }
    if let Some(address) = body.address {
        match serde_json::to_value(address) {
            Ok(v) => {
                patch.insert("address".to_string(), v);
            }
            Err(e) => return internal_error(e),
        }
    }

    match state.store.update(&id, &patch).await {
        Ok(Some(stored)) => (
            StatusCode::ACCEPTED,
            Json(api_repr(&stored.id, &stored.restaurant)),
        )
            .into_response(),
        Ok(None) => not_found(),
        Err(e) => internal_error(e),
    }
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    params(("id" = String, Path, description = "Restaurant id")),
    responses(
        (status = 204, description = "Deleted (or never existed)"),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => internal_error(e),
    }
}
