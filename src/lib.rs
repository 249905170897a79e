pub mod config;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod events;
pub mod models;
pub mod output;
pub mod routing;
pub mod state;
