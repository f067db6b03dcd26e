// src/processing/libvips/runtime.rs

//! Process-wide libvips lifecycle.
//!
//! libvips keeps global state (its worker threads, the operation cache) that
//! must be initialised once before any image is touched and never torn down
//! while requests may still run. The guard therefore lives in a `OnceLock`
//! and is never dropped.

use std::sync::{Mutex, OnceLock};

use tracing::debug;

use crate::utils::{ConverterError, ConverterResult};

/// Thread-safe guard for the libvips `VipsApp` lifecycle.
///
/// # Safety
/// libvips is designed for concurrent multi-threaded use. Individual
/// `VipsImage` values never leave the blocking task that created them; only
/// the application handle is shared.
struct VipsAppGuard(libvips::VipsApp);

unsafe impl Send for VipsAppGuard {}
unsafe impl Sync for VipsAppGuard {}

static VIPS: OnceLock<VipsAppGuard> = OnceLock::new();
// Dropping a second VipsApp would shut libvips down, so creation is serialised.
static STARTING: Mutex<()> = Mutex::new(());

/// Starts libvips if it is not running yet.
///
/// `concurrency` is only honoured by the first caller; 0 lets libvips size
/// its pool from the available CPU cores.
pub fn ensure_started(concurrency: i32) -> ConverterResult<()> {
    if VIPS.get().is_some() {
        return Ok(());
    }

    let _starting = STARTING
        .lock()
        .map_err(|_| ConverterError::runtime("libvips start lock poisoned"))?;
    if VIPS.get().is_some() {
        return Ok(());
    }

    let app = libvips::VipsApp::default("image-converter")
        .map_err(|e| ConverterError::runtime(format!("Failed to initialize libvips: {e}")))?;
    app.concurrency_set(concurrency.max(0));
    debug!("libvips initialized (concurrency: {})", app.concurency_get());

    if VIPS.set(VipsAppGuard(app)).is_err() {
        return Err(ConverterError::runtime("libvips initialized twice"));
    }
    Ok(())
}
