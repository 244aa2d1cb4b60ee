//! Hosted backend access

mod client;

pub use client::*;
