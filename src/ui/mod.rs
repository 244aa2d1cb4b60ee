//! Reader view values

mod buttons;

pub use buttons::*;
