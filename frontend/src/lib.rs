pub mod analytics;
pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod notify;
pub mod pdf;
pub mod services;
pub mod storage;
pub mod store;
pub mod validation;
