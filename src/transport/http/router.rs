use crate::transport::http::handlers::{common, health, restaurants};
use crate::transport::http::types::{
    CreateRestaurantRequest, ErrorBody, RestaurantList, UpdateRestaurantRequest,
};
use crate::domain::restaurant::{Address, GradeEntry, RestaurantRepr};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        restaurants::list_handler,
        restaurants::get_handler,
        restaurants::create_handler,
        restaurants::update_handler,
        restaurants::delete_handler
    ),
    components(schemas(
        CreateRestaurantRequest,
        UpdateRestaurantRequest,
        RestaurantList,
        RestaurantRepr,
        Address,
        GradeEntry,
        ErrorBody
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/restaurants",
            get(restaurants::list_handler).post(restaurants::create_handler),
        )
        .route(
            "/restaurants/:id",
            get(restaurants::get_handler)
                .put(restaurants::update_handler)
                .delete(restaurants::delete_handler),
        )
        .fallback(|| async { common::not_found() })
        .with_state(app_state)
}
