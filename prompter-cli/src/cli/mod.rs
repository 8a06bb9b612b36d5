//! CLI command handlers

pub mod handlers;
