pub mod api;
pub mod chart;
pub mod compare;
pub mod config;
pub mod data;
pub mod format;
pub mod freshness;
pub mod pages;
pub mod search;
pub mod ui;

pub use config::Config;
