//! First-party store client for the analytics pipeline.

pub mod client;
pub mod config;
pub mod settings;
pub mod sink;

pub use client::*;
pub use config::*;
pub use sink::*;
