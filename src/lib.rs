//! Authentication gateway.
//!
//! Verifies user credentials against the relational store, issues short-lived
//! HS256 JSON Web Tokens, and relays account creation to the downstream user
//! service.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod prelude;
pub mod proxy;
pub mod schema;
pub mod storage;
pub mod web;
