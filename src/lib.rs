pub mod config;
pub mod error;
pub mod json;
pub mod output;
pub mod platform;
pub mod queue;
pub mod workflow;
