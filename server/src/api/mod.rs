pub mod health;
pub mod username;
