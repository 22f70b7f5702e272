pub mod auth;
pub mod listing_service;
