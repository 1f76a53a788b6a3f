pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod dashboard;
pub mod errors;
pub mod membership;
pub mod orders;
pub mod ports;
pub mod status;
