pub mod api;
pub mod app;
pub mod chat;
pub mod cli;
pub mod config;
pub mod filters;
pub mod geo;
pub mod page;
pub mod paths;
pub mod persistence;
pub mod photos;
pub mod property;
pub mod util;
