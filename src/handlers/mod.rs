pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod dashboard;
pub mod memberships;
pub mod orders;
