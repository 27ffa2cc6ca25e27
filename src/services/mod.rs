// Services module - credential handling

pub mod password;
pub mod user_store;
