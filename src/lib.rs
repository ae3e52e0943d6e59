//! Categorized RSS subscription catalog persisted as YAML, plus a renderer
//! that turns a fetched feed item into a readable markdown document.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod render;
pub mod services;
pub mod storage;
