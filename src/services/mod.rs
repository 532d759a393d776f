// src/services/mod.rs
pub mod membership_service;
