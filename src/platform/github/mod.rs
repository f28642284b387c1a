pub mod client;
pub mod link;

pub use client::GitHubPlatform;
