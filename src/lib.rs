pub mod availability;
pub mod config;
pub mod display;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod store;
pub mod web;

pub use error::{Error, Result};
