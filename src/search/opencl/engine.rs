// Search Bench - Free and Open Source Software Statement
//
// File: src/search/opencl/engine.rs
// Version: 1.0.0
//
// OpenCL substring search: one work item per start position, matches
// collected through an atomic slot counter

use super::device::OpenClDevice;
use crate::search::MAX_GPU_MATCHES;
use anyhow::{Error, Result};
use log::{debug, error, info, warn};
use opencl3::{
    command_queue::{CL_QUEUE_PROFILING_ENABLE, CommandQueue},
    context::Context,
    kernel::{ExecuteKernel, Kernel},
    memory::{Buffer, CL_MEM_COPY_HOST_PTR, CL_MEM_READ_ONLY, CL_MEM_READ_WRITE, CL_MEM_WRITE_ONLY},
    program::Program,
    types::{CL_TRUE, cl_int, cl_uchar},
};
use std::{ptr, time::Instant};

const LOG_TARGET: &str = "search_bench::opencl::engine";

const KERNEL_NAME: &str = "find_all_limited";

/// Compiled search kernel bound to one device
pub struct OpenClSearcher {
    device: OpenClDevice,
    context: Context,
    queue: CommandQueue,
    kernel: Kernel,
    // Kept alive for the kernel's lifetime
    _program: Program,
}

impl OpenClSearcher {
    /// Build the kernel once for `device`
    pub fn new(device: OpenClDevice) -> Result<Self> {
        info!(target: LOG_TARGET, "Initializing OpenCL search for {}", device.name());
        let build_start = Instant::now();

        let context = Context::from_device(device.device())
            .map_err(|e| Error::msg(format!("Failed to create context: {}", e)))?;

        let kernel_source = include_str!("../../../kernels/opencl/substring_search.cl");
        let mut program = Program::create_from_source(&context, kernel_source)
            .map_err(|e| Error::msg(format!("Failed to create program: {}", e)))?;

        if let Err(e) = program.build(context.devices(), "") {
            error!(target: LOG_TARGET, "Failed to build OpenCL program: {}", e);
            for device_id in context.devices() {
                if let Ok(log) = program.get_build_log(*device_id) {
                    error!(target: LOG_TARGET, "Build log for device {:?}: {}", device_id, log);
                }
            }
            return Err(Error::msg(format!("Program build failed: {}", e)));
        }

        let kernel = Kernel::create(&program, KERNEL_NAME)
            .map_err(|e| Error::msg(format!("Failed to create kernel: {}", e)))?;

        let queue = CommandQueue::create_default(&context, CL_QUEUE_PROFILING_ENABLE)
            .map_err(|e| Error::msg(format!("Failed to create command queue: {}", e)))?;

        info!(target: LOG_TARGET,
            "✅ OpenCL search ready on {} in {:.2}ms",
            device.info_string(),
            build_start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Self {
            device,
            context,
            queue,
            kernel,
            _program: program,
        })
    }

    /// Searcher on the first detected GPU
    pub fn first_available() -> Result<Self> {
        let device = OpenClDevice::detect_devices()?
            .into_iter()
            .next()
            .ok_or_else(|| Error::msg("No OpenCL GPU device available"))?;
        Self::new(device)
    }

    pub fn device(&self) -> &OpenClDevice {
        &self.device
    }

    /// Every match start in ascending order, at most [`MAX_GPU_MATCHES`]
    pub fn find_all(&self, text: &[u8], marker: &[u8]) -> Result<Vec<i64>> {
        if marker.is_empty() {
            return Ok((0..=text.len()).map(|i| i as i64).collect());
        }
        if marker.len() > text.len() {
            return Ok(Vec::new());
        }
        if !self.device.fits(text.len()) {
            return Err(Error::msg(format!(
                "Text of {} bytes exceeds the {} byte buffer limit of {}",
                text.len(),
                self.device.max_alloc_bytes(),
                self.device.name()
            )));
        }

        let text_len = cl_int::try_from(text.len())
            .map_err(|_| Error::msg(format!("Text of {} bytes exceeds kernel index range", text.len())))?;
        let marker_len = cl_int::try_from(marker.len())
            .map_err(|_| Error::msg("Marker exceeds kernel index range"))?;
        let max_matches = MAX_GPU_MATCHES as cl_int;

        let mut text_buffer = unsafe {
            Buffer::<cl_uchar>::create(&self.context, CL_MEM_READ_ONLY, text.len(), ptr::null_mut())
                .map_err(|e| Error::msg(format!("Failed to create text buffer: {}", e)))?
        };
        let mut marker_buffer = unsafe {
            Buffer::<cl_uchar>::create(&self.context, CL_MEM_READ_ONLY, marker.len(), ptr::null_mut())
                .map_err(|e| Error::msg(format!("Failed to create marker buffer: {}", e)))?
        };
        let matches_buffer = unsafe {
            Buffer::<cl_int>::create(&self.context, CL_MEM_WRITE_ONLY, MAX_GPU_MATCHES, ptr::null_mut())
                .map_err(|e| Error::msg(format!("Failed to create match buffer: {}", e)))?
        };
        let initial_count: [cl_int; 1] = [0];
        let count_buffer = unsafe {
            Buffer::<cl_int>::create(
                &self.context,
                CL_MEM_READ_WRITE | CL_MEM_COPY_HOST_PTR,
                1,
                initial_count.as_ptr() as *mut std::ffi::c_void,
            )
            .map_err(|e| Error::msg(format!("Failed to create count buffer: {}", e)))?
        };

        unsafe {
            self.queue
                .enqueue_write_buffer(&mut text_buffer, CL_TRUE, 0, text, &[])
                .map_err(|e| Error::msg(format!("Failed to write text buffer: {}", e)))?;
            self.queue
                .enqueue_write_buffer(&mut marker_buffer, CL_TRUE, 0, marker, &[])
                .map_err(|e| Error::msg(format!("Failed to write marker buffer: {}", e)))?;
        }

        let global_size = text.len() - marker.len() + 1;
        let kernel_event = unsafe {
            ExecuteKernel::new(&self.kernel)
                .set_arg(&text_buffer)
                .set_arg(&marker_buffer)
                .set_arg(&matches_buffer)
                .set_arg(&count_buffer)
                .set_arg(&text_len)
                .set_arg(&marker_len)
                .set_arg(&max_matches)
                .set_global_work_size(global_size)
                .enqueue_nd_range(&self.queue)
                .map_err(|e| Error::msg(format!("Failed to execute kernel: {}", e)))?
        };

        kernel_event
            .wait()
            .map_err(|e| Error::msg(format!("Failed to wait for kernel: {}", e)))?;
        self.queue
            .finish()
            .map_err(|e| Error::msg(format!("Failed to finish queue: {}", e)))?;

        if let (Ok(start), Ok(end)) = (
            kernel_event.profiling_command_start(),
            kernel_event.profiling_command_end(),
        ) {
            debug!(target: LOG_TARGET,
                "GPU exec: {:.3}ms over {} work items",
                end.saturating_sub(start) as f64 / 1_000_000.0,
                global_size
            );
        }

        let mut count: [cl_int; 1] = [0];
        unsafe {
            self.queue
                .enqueue_read_buffer(&count_buffer, CL_TRUE, 0, &mut count, &[])
                .map_err(|e| Error::msg(format!("Failed to read match count: {}", e)))?;
        }

        let found = usize::try_from(count[0]).unwrap_or(0);
        if found > MAX_GPU_MATCHES {
            warn!(target: LOG_TARGET,
                "Kernel found {} matches, only the first {} slots are reported",
                found, MAX_GPU_MATCHES
            );
        }

        let mut positions: Vec<cl_int> = vec![0; found.min(MAX_GPU_MATCHES)];
        if !positions.is_empty() {
            unsafe {
                self.queue
                    .enqueue_read_buffer(&matches_buffer, CL_TRUE, 0, &mut positions, &[])
                    .map_err(|e| Error::msg(format!("Failed to read matches: {}", e)))?;
            }
        }

        // Slot order follows atomic contention, not position
        let mut matches: Vec<i64> = positions.into_iter().map(i64::from).collect();
        matches.sort_unstable();
        Ok(matches)
    }
}
