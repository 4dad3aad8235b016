//! Shopping cart service: guest and user carts over a pluggable store.

pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod response;
pub mod routes;
pub mod services;
pub mod shutdown;
pub mod state;
