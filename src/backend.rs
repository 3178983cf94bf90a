//! Backend abstraction - CPU inference backend
//!
//! Serving runs on the NdArray backend. Inference never needs gradient
//! tracking, so no autodiff wrapper is exposed here.

use burn::backend::ndarray::NdArrayDevice;
use burn::backend::NdArray;

/// The default inference backend
pub type DefaultBackend = NdArray;

/// Get the default device (CPU)
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::Cpu
}

/// Get a human-readable name for the current backend
pub fn backend_name() -> &'static str {
    "NdArray (CPU)"
}
