/// Live camera capture
///
/// A [`CameraSession`] owns the device for the lifetime of the capture
/// overlay. A worker thread streams frames into a shared latest-frame slot
/// that the UI polls for the live preview; the shutter encodes the current
/// frame as JPEG and hands it to the same ingestion path as an uploaded
/// file. The stream is released on every exit path: `shutdown` covers
/// cancel and successful capture, `Drop` covers teardown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use image::codecs::jpeg::JpegEncoder;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use tokio::task;

use crate::error::{AppError, Result};

/// One decoded preview frame, RGBA for direct display.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// An open camera stream plus its preview worker.
#[derive(Debug)]
pub struct CameraSession {
    latest: Arc<Mutex<Option<CameraFrame>>>,
    stop: Arc<AtomicBool>,
    worker: Option<thread::JoinHandle<()>>,
}

impl CameraSession {
    /// Open the camera, preferring a rear-facing device and falling back
    /// silently to the first available one.
    ///
    /// Runs on a blocking thread because device negotiation can stall for
    /// hundreds of milliseconds.
    pub async fn open() -> Result<Arc<CameraSession>> {
        task::spawn_blocking(open_blocking)
            .await
            .map_err(|e| AppError::Camera(format!("task join error: {}", e)))?
    }

    /// The most recent preview frame, if the worker has produced one yet.
    pub fn latest_frame(&self) -> Option<CameraFrame> {
        self.latest.lock().ok().and_then(|slot| slot.clone())
    }

    /// Shutter press: encode the current frame as JPEG.
    pub fn capture_jpeg(&self) -> Result<Vec<u8>> {
        let frame = self
            .latest_frame()
            .ok_or_else(|| AppError::Camera("no frame available yet".into()))?;

        let rgba = image::RgbaImage::from_raw(frame.width, frame.height, frame.rgba)
            .ok_or_else(|| AppError::Camera("malformed frame buffer".into()))?;
        let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();

        let mut jpeg = Vec::new();
        JpegEncoder::new(&mut jpeg)
            .encode_image(&rgb)
            .map_err(|e| AppError::Camera(format!("failed to encode capture: {}", e)))?;
        Ok(jpeg)
    }

    /// Signal the worker to stop streaming and release the device.
    /// Safe to call more than once.
    pub fn shutdown(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn open_blocking() -> Result<Arc<CameraSession>> {
    let index = pick_device()?;
    let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
    let mut camera =
        Camera::new(index, format).map_err(|e| AppError::Camera(e.to_string()))?;
    camera
        .open_stream()
        .map_err(|e| AppError::Camera(e.to_string()))?;

    log::info!(
        "camera stream open: {}x{}",
        camera.resolution().width(),
        camera.resolution().height()
    );

    let latest = Arc::new(Mutex::new(None));
    let stop = Arc::new(AtomicBool::new(false));

    let worker = {
        let latest = Arc::clone(&latest);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                match camera.frame().and_then(|b| b.decode_image::<RgbFormat>()) {
                    Ok(rgb) => {
                        let (width, height) = rgb.dimensions();
                        // nokhwa's buffer comes from its own image-crate
                        // version; go through raw bytes to stay decoupled.
                        let raw = rgb.into_raw();
                        let mut rgba = Vec::with_capacity(raw.len() / 3 * 4);
                        for px in raw.chunks_exact(3) {
                            rgba.extend_from_slice(px);
                            rgba.push(0xFF);
                        }
                        if let Ok(mut slot) = latest.lock() {
                            *slot = Some(CameraFrame {
                                width,
                                height,
                                rgba,
                            });
                        }
                    }
                    Err(e) => {
                        log::warn!("dropped camera frame: {}", e);
                    }
                }
            }
            // Stopping the stream is what actually releases the hardware.
            if let Err(e) = camera.stop_stream() {
                log::warn!("failed to stop camera stream: {}", e);
            } else {
                log::info!("camera stream released");
            }
        })
    };

    Ok(Arc::new(CameraSession {
        latest,
        stop,
        worker: Some(worker),
    }))
}

/// Choose a device index, preferring names that look rear-facing.
fn pick_device() -> Result<CameraIndex> {
    let devices =
        nokhwa::query(ApiBackend::Auto).map_err(|e| AppError::Camera(e.to_string()))?;

    if devices.is_empty() {
        return Err(AppError::Camera("no camera device found".into()));
    }

    let rear = devices.iter().find(|info| {
        let name = info.human_name().to_lowercase();
        name.contains("back") || name.contains("rear") || name.contains("environment")
    });

    let chosen = rear.unwrap_or(&devices[0]);
    log::info!("using camera: {}", chosen.human_name());
    Ok(chosen.index().clone())
}
