//! Enginesim Core - Engine assembly model and exhaust convolution DSP

pub mod components;
pub mod config;
pub mod dsp;
pub mod engine;
pub mod lifecycle;
pub mod types;
pub mod units;

pub use types::*;
