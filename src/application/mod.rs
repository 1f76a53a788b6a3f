pub mod cart_service;
pub mod catalog_service;
pub mod checkout_service;
pub mod dashboard_service;
pub mod membership_service;
pub mod order_service;
pub mod status_service;
