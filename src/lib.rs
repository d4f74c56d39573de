// src/lib.rs
pub mod config;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod upstream;
pub mod utils;
