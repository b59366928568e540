//! HTTP handlers

pub mod health;
pub mod forms;
pub mod predict;
pub mod models;
