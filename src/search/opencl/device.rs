// Search Bench - Free and Open Source Software Statement
//
// File: src/search/opencl/device.rs
// Version: 1.0.0
//
// GPU discovery for the OpenCL search candidate. Only the properties the
// search needs are kept: a display name and the largest single buffer the
// device accepts, which bounds the fixture size it can scan.

use anyhow::{Error, Result};
use log::{debug, info, warn};
use opencl3::{
    device::{CL_DEVICE_TYPE_GPU, Device},
    platform::get_platforms,
};

const LOG_TARGET: &str = "search_bench::opencl::device";

/// A GPU the search kernel can run on
#[derive(Debug, Clone)]
pub struct OpenClDevice {
    name: String,
    platform: String,
    compute_units: u32,
    max_alloc_bytes: u64,
    device: Device,
}

impl OpenClDevice {
    fn from_device(device: Device, platform: &str) -> Self {
        Self {
            name: device.name().unwrap_or_else(|_| "Unknown GPU".to_string()),
            platform: platform.to_string(),
            compute_units: device.max_compute_units().unwrap_or(0),
            max_alloc_bytes: device.max_mem_alloc_size().unwrap_or(0),
            device,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Largest buffer the device allocates in one piece
    pub fn max_alloc_bytes(&self) -> u64 {
        self.max_alloc_bytes
    }

    /// Whether a text of `len` bytes fits in a single device buffer
    pub fn fits(&self, len: usize) -> bool {
        self.max_alloc_bytes == 0 || len as u64 <= self.max_alloc_bytes
    }

    /// Every GPU on every platform, in platform order
    pub fn detect_devices() -> Result<Vec<OpenClDevice>> {
        let platforms = get_platforms()
            .map_err(|e| Error::msg(format!("OpenCL platform detection failed: {}", e)))?;

        let mut gpus = Vec::new();
        for platform in platforms {
            let platform_name = platform.name().unwrap_or_else(|_| "Unknown Platform".to_string());
            let ids = match platform.get_devices(CL_DEVICE_TYPE_GPU) {
                Ok(ids) => ids,
                Err(e) => {
                    debug!(target: LOG_TARGET, "Platform {} has no GPUs: {}", platform_name, e);
                    continue;
                }
            };
            for id in ids {
                let gpu = OpenClDevice::from_device(Device::new(id), &platform_name);
                info!(target: LOG_TARGET, "🎮 Found GPU {}: {}", gpus.len(), gpu.info_string());
                gpus.push(gpu);
            }
        }

        if gpus.is_empty() {
            warn!(target: LOG_TARGET, "No OpenCL GPU devices detected");
        }
        Ok(gpus)
    }

    /// One-line description for logs
    pub fn info_string(&self) -> String {
        format!(
            "{} [{}] ({} CU, max buffer {:.1} GiB)",
            self.name,
            self.platform,
            self.compute_units,
            self.max_alloc_bytes as f64 / (1024.0 * 1024.0 * 1024.0)
        )
    }
}
