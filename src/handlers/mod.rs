// src/handlers/mod.rs
pub mod admin;
pub mod agreements;
pub mod emails;
pub mod error;
pub mod investments;
pub mod investors;
pub mod transactions;
