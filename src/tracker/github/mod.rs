mod client;
mod mapper;

pub use client::GitHubTracker;
