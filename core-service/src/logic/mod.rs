//! Form inference logic: schema → validator → dispatcher

pub mod config;
pub mod schema;
pub mod features;
pub mod validator;
pub mod model;
pub mod dispatch;
pub mod pipeline;
