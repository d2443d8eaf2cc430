#![forbid(unsafe_code)]

pub mod agents;
pub mod capabilities;
pub mod cli;
pub mod commands;
pub mod composer;
pub mod config;
pub mod deployment;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod schema;
pub mod utils;
