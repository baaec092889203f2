pub mod documents;

pub use documents::{ListFilter, RestaurantStore, StoredRestaurant};
