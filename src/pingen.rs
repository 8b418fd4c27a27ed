//! Main module for pingen library functionality

pub mod config;
pub mod discovery;
pub mod driver;
pub mod header;
pub mod patterns;
pub mod pins;
pub mod report;
pub mod variants;
