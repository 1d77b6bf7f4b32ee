pub mod account;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod favorite;
pub mod format;
pub mod goods;
pub mod handlers;
pub mod listing;
pub mod purchase;
pub mod render;
pub mod scheduler;
pub mod session;
