//! Digital signal processing for the synthesis path
//!
//! Per-sample filters driven once per simulated audio sample. Nothing here
//! allocates or logs on the `process` path.

mod convolution;

pub use convolution::ConvolutionFilter;
