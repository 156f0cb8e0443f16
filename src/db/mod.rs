//! PostgreSQL access through diesel and an r2d2 pool.

pub mod config;
pub mod connection;
pub mod user;
