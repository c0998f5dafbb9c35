#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;
mod types_rs;
mod utils;

pub use client::Client;
pub use config::Config;
pub use error::Error;
pub use types_rs::*;

#[cfg(feature = "analytics")]
pub mod analytics;

#[cfg(feature = "files")]
pub mod files;

#[cfg(feature = "gateways")]
pub mod gateways;

#[cfg(feature = "groups")]
pub mod groups;

#[cfg(feature = "keys")]
pub mod keys;

#[cfg(feature = "signatures")]
pub mod signatures;

#[cfg(feature = "upload")]
pub mod upload;
