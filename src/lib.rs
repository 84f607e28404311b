pub mod app;
pub mod config;
pub mod errors;
pub mod identifier;
pub mod layout;
pub mod render;
pub mod services;
pub mod storage;
pub mod web;
