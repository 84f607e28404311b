//! HTTP request handlers

pub mod card;
pub mod health;
pub mod page;
