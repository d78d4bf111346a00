pub(crate) mod errors;
pub(crate) mod schemas;

pub use errors::CartError;
pub use schemas::{Cart, CartLine, MenuItem, RestaurantScope};
