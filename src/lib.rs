pub mod api;
pub mod config;
pub mod core;
pub mod feed;
pub mod follow;
pub mod models;
pub mod posts;
