pub(crate) mod errors;
pub(crate) mod schemas;
pub mod utils;

pub use errors::BookingFlowError;
pub use schemas::{BookingIntent, Room};
