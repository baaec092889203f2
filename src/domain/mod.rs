pub mod restaurant;

pub use restaurant::{
    address_string, api_repr, most_recent_grade, Address, GradeEntry, Restaurant, RestaurantRepr,
};
