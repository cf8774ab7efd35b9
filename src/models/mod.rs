// src/models/mod.rs
pub mod attendance;
pub mod classroom;
pub mod enrollment;
pub mod profile;
