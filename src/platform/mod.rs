//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (timestamps for progress records and scene resume)
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Logging initialization

pub mod storage;
pub mod time;

/// Initialize the `log` facade for the current platform.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Initialize the `log` facade for the current platform.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::try_init();
}
