// Core modules
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod export;
pub mod infrastructure;
pub mod models;
