pub mod config;
pub mod error;
pub mod outcome;
pub mod reconcile;
pub mod report;
pub mod tracker;
