// src/services/mod.rs
pub mod backup;
pub mod baseline;
pub mod config;
pub mod email;
pub mod export;
pub mod interest;
pub mod store;
pub mod templates;
