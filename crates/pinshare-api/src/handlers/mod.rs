//! Request handlers, one module per resource.

pub mod file;
pub mod gateway;
pub mod health;
pub mod share;
