pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod host;
pub mod i18n;
pub mod models;
pub mod shell;
pub mod ui;
