pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::server::Server;
pub use domain::restaurant::{
    address_string, api_repr, most_recent_grade, Address, GradeEntry, Restaurant, RestaurantRepr,
};
pub use storage::documents::{ListFilter, RestaurantStore, StoredRestaurant};
