// Middleware - request authentication and shared state

pub mod auth;
pub mod state;
