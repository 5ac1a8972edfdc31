//! Process hardening
//!
//! Disables core dumps via `setrlimit(RLIMIT_CORE, 0)` so that a crash
//! while a seed phrase or its shares are in memory never writes them to
//! disk. Best-effort: containers and unprivileged users may not permit it,
//! in which case a warning is logged and the run continues.

use std::sync::atomic::{AtomicBool, Ordering};

/// Set once `setrlimit` has succeeded; a failed attempt leaves it clear
static CORE_DUMPS_DISABLED: AtomicBool = AtomicBool::new(false);

/// Disable core dumps for the current process.
///
/// Returns `true` if core dumps are disabled after the call. A failed
/// attempt is retried on the next call.
pub fn disable_core_dumps() -> bool {
    if CORE_DUMPS_DISABLED.load(Ordering::SeqCst) {
        return true; // Already disabled
    }

    #[cfg(unix)]
    let disabled = unix::disable_core_dumps_impl();

    #[cfg(not(unix))]
    let disabled = {
        log::warn!("core dump prevention not supported on this platform");
        false
    };

    if disabled {
        CORE_DUMPS_DISABLED.store(true, Ordering::SeqCst);
    }
    disabled
}

#[cfg(unix)]
mod unix {
    pub fn disable_core_dumps_impl() -> bool {
        let rlim = libc::rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        // SAFETY: setrlimit only reads the struct we pass it
        let result = unsafe { libc::setrlimit(libc::RLIMIT_CORE, &rlim) };
        if result != 0 {
            log::warn!(
                "failed to disable core dumps: {}",
                std::io::Error::last_os_error()
            );
            return false;
        }
        log::debug!("core dumps disabled");
        true
    }
}
