pub(crate) mod errors;
pub mod resolver;
pub(crate) mod schemas;
pub mod utils;
pub mod verification;

pub use errors::PaymentFlowError;
pub use schemas::{CallbackQuery, Destination, PaymentLaunch};
