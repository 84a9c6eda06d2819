pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod route_records;
pub mod seed;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod users;
