// Search Bench - Free and Open Source Software Statement
//
// File: src/search/opencl/mod.rs
// Version: 1.0.0
//
// OpenCL module for GPU search - provides the OpenCL multi-result candidate

pub mod device;
pub mod engine;

// Re-export key types
pub use device::OpenClDevice;
pub use engine::OpenClSearcher;
