//! Callback-driven frame producers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::convert::convert;
use crate::error::Error;
use crate::frame::{Frame, Timestamp};
use crate::types::{PixelFormat, Size, StreamConfig};

/// Callback-based frame delivery.
pub trait FrameSource {
    type Error: std::error::Error;

    /// Format, size and nominal rate of the frames this source emits.
    fn config(&self) -> &StreamConfig;

    /// Start producing. The callback runs on a source-owned thread, once per frame.
    fn start<F>(&mut self, callback: F) -> Result<(), Self::Error>
    where
        F: FnMut(&Frame) + Send + 'static;

    fn stop(&mut self) -> Result<(), Self::Error>;
}

/// Synthetic source producing a moving colour gradient.
///
/// Frames are rendered as `Argb32` and converted to the configured format, so
/// an `I420` or `Nv21` source exercises the same conversions a camera feed
/// would. A zero frame rate produces frames back to back.
pub struct PatternSource {
    config: StreamConfig,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl PatternSource {
    pub fn new(config: StreamConfig) -> Result<Self, Error> {
        if config.size.is_empty() {
            return Err(Error::InvalidDimensions(config.size));
        }
        Ok(PatternSource {
            config,
            stop: Arc::new(AtomicBool::new(false)),
            worker: None,
        })
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }
}

/// Render frame number `index` of the test pattern.
pub fn render_pattern(
    config: &StreamConfig,
    index: u64,
    timestamp: Timestamp,
) -> Result<Frame, Error> {
    let Size { width, height } = config.size;
    let shift = index as u32;
    let pixels: Vec<u32> = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                let r = (x.wrapping_add(shift) & 0xFF) << 16;
                let g = (y & 0xFF) << 8;
                let b = (x.wrapping_add(y) / 2) & 0xFF;
                0xFF00_0000 | r | g | b
            })
        })
        .collect();
    let argb = Frame::from_argb_pixels(config.size, &pixels, timestamp)?;

    match config.pixel_format {
        PixelFormat::Argb32 => Ok(argb),
        PixelFormat::I420 => convert(&argb, PixelFormat::I420, None),
        PixelFormat::Nv21 => {
            let i420 = convert(&argb, PixelFormat::I420, None)?;
            convert(&i420, PixelFormat::Nv21, None)
        }
    }
}

impl FrameSource for PatternSource {
    type Error = Error;

    fn config(&self) -> &StreamConfig {
        &self.config
    }

    fn start<F>(&mut self, mut callback: F) -> Result<(), Self::Error>
    where
        F: FnMut(&Frame) + Send + 'static,
    {
        if self.worker.is_some() {
            return Err(Error::AlreadyStarted);
        }

        let stop = Arc::new(AtomicBool::new(false));
        self.stop = stop.clone();
        let config = self.config;
        let interval = config.frame_rate.frame_interval();

        debug!(
            format = ?config.pixel_format,
            width = config.size.width,
            height = config.size.height,
            fps = config.frame_rate.as_f64(),
            "starting pattern source"
        );

        let worker = thread::Builder::new()
            .name("pattern-source".into())
            .spawn(move || {
                let started = Instant::now();
                let mut deadline = started;
                let mut last: Option<u64> = None;
                let mut index = 0u64;

                while !stop.load(Ordering::Acquire) {
                    let elapsed = started.elapsed().as_nanos() as u64;
                    // keep timestamps strictly increasing even if the clock hasn't moved
                    let nanos = last.map_or(elapsed, |prev| elapsed.max(prev + 1));
                    last = Some(nanos);

                    match render_pattern(&config, index, Timestamp(nanos)) {
                        Ok(frame) => {
                            trace!(index, timestamp = nanos, "pattern frame");
                            callback(&frame);
                        }
                        Err(e) => {
                            warn!(error = %e, "pattern source stopped");
                            break;
                        }
                    }
                    index += 1;

                    if let Some(interval) = interval {
                        deadline += interval;
                        let now = Instant::now();
                        if deadline > now {
                            thread::sleep(deadline - now);
                        }
                    }
                }
                debug!(frames = index, "pattern source finished");
            })?;

        self.worker = Some(worker);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        let worker = self.worker.take().ok_or(Error::NotStarted)?;
        self.stop.store(true, Ordering::Release);
        if worker.join().is_err() {
            warn!("pattern source thread panicked");
        }
        Ok(())
    }
}

impl Drop for PatternSource {
    fn drop(&mut self) {
        if self.worker.is_some() {
            let _ = self.stop();
        }
    }
}
