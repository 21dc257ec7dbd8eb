//! A barebones client for the Apple Music API.
#![deny(missing_docs)]

mod client;
pub use client::*;

mod transport;
pub use transport::*;

mod request;
