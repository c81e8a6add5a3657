// src/handlers/mod.rs

pub mod content;
pub mod health;
pub mod policy;
pub mod sanitize;
