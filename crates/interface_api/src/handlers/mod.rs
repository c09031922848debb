//! Request handlers

pub mod consumption;
pub mod health;
