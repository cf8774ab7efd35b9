// src/services/mod.rs
pub mod auth_service;
pub mod classroom_service;
pub mod code_generator;
pub mod dashboard_service;
pub mod enrollment_service;
pub mod profile_service;
