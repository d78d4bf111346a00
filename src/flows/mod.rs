pub mod booking;
pub mod cart;
pub mod payment;
