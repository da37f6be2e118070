pub mod academic;
pub mod auth;
pub mod dropdowns;
pub mod health;
pub mod pages;
