//! Library exports for shortsgen, shared between the binary and tests.

pub mod auth;
pub mod client;
pub mod config;
pub mod generator;
pub mod metrics;
pub mod models;
pub mod providers;
pub mod routes;
pub mod session;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;
pub mod view;
