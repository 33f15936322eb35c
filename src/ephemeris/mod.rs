//! Planetary and house calculations backed by Swiss Ephemeris.

mod calculator;
mod houses;

pub use calculator::*;
pub use houses::*;

use std::sync::{Mutex, Once};

static INIT: Once = Once::new();

// Swiss Ephemeris keeps global state between calls; serialize FFI access.
pub(crate) static EPHE_LOCK: Mutex<()> = Mutex::new(());

/// Initialize Swiss Ephemeris (null ephemeris path, Moshier fallback).
/// Safe to call more than once.
pub fn init_ephemeris() {
    INIT.call_once(|| unsafe {
        libswisseph_sys::swe_set_ephe_path(std::ptr::null_mut());
    });
}
