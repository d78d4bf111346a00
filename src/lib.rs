pub mod booking_client;
pub mod configuration;
pub mod errors;
pub mod flows;
pub mod payment_client;
pub mod schemas;
pub mod startup;
pub mod telemetry;
pub mod utils;
