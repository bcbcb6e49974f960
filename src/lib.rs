pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod state;
pub mod store;
pub mod upload;
