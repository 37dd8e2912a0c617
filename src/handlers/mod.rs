pub mod auth;
pub mod dashboard;
pub mod orders;
pub mod pricing;
