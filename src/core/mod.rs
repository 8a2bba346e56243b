//! Core store logic.

pub mod credstore;
pub mod ini;
pub mod paths;
