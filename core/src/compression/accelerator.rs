//! compression/accelerator.rs
//! Seam to an external compression accelerator (e.g. QAT).
//!
//! Two pieces of process-global state live here:
//! - the installed driver, a single slot shared by all threads;
//! - one accelerator session per driver per thread, opened lazily on the
//!   thread's first accelerated call and kept until the thread exits. No
//!   codec ever closes it, so every accelerated codec used on a thread shares
//!   that thread's session.
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::compression::types::CodecError;

/// Failure statuses reported by an accelerator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AcceleratorStatus {
    /// Invalid parameters for the call.
    Params,
    /// The accelerator did not complete the request.
    Fail,
    /// Any other driver-specific status code.
    Other(i32),
}

impl fmt::Display for AcceleratorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcceleratorStatus::Params => write!(f, "params is invalid"),
            AcceleratorStatus::Fail => write!(f, "function did not succeed"),
            AcceleratorStatus::Other(code) => write!(f, "failed with error: {}", code),
        }
    }
}

/// One open accelerator session. Produces and consumes gzip framing.
pub trait AcceleratorSession {
    fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, AcceleratorStatus>;
    fn decompress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, AcceleratorStatus>;
}

/// Entry point into an accelerator library.
pub trait AcceleratorDriver: Send + Sync {
    /// Stable label; also the key of the per-thread session registry.
    fn name(&self) -> &'static str;

    fn open_session(&self) -> Result<Box<dyn AcceleratorSession>, AcceleratorStatus>;

    fn max_compressed_len(&self, input_len: usize) -> usize;
}

static DRIVER: RwLock<Option<Arc<dyn AcceleratorDriver>>> = RwLock::new(None);

thread_local! {
    static SESSIONS: RefCell<HashMap<&'static str, Box<dyn AcceleratorSession>>> =
        RefCell::new(HashMap::new());
}

/// Install the process-wide accelerator driver, returning the previous one.
pub fn install_accelerator_driver(driver: Arc<dyn AcceleratorDriver>) -> Option<Arc<dyn AcceleratorDriver>> {
    let mut slot = DRIVER.write().unwrap_or_else(PoisonError::into_inner);
    slot.replace(driver)
}

/// Remove the installed driver. Sessions already opened stay with their threads.
pub fn uninstall_accelerator_driver() -> Option<Arc<dyn AcceleratorDriver>> {
    let mut slot = DRIVER.write().unwrap_or_else(PoisonError::into_inner);
    slot.take()
}

pub fn installed_accelerator_driver() -> Option<Arc<dyn AcceleratorDriver>> {
    DRIVER.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Run `f` against this thread's session for `driver`, opening it on first use.
///
/// # Errors
/// - `BackendInit` if the driver cannot open a session.
/// - `InvalidState` on re-entrant use from within `f` on the same thread.
pub(crate) fn with_thread_session<R>(
    driver: &dyn AcceleratorDriver,
    f: impl FnOnce(&mut dyn AcceleratorSession) -> R,
) -> Result<R, CodecError> {
    SESSIONS.with(|cell| {
        let mut sessions = cell.try_borrow_mut().map_err(|_| {
            CodecError::InvalidState(format!(
                "{} accelerator session is already in use on this thread",
                driver.name()
            ))
        })?;
        let session = match sessions.entry(driver.name()) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                let session = driver.open_session().map_err(|status| CodecError::BackendInit {
                    backend: driver.name(),
                    msg: format!("session setup {}", status),
                })?;
                debug!(
                    driver = driver.name(),
                    thread = ?std::thread::current().id(),
                    "opened accelerator session"
                );
                slot.insert(session)
            }
        };
        Ok(f(session.as_mut()))
    })
}

/// Whether this thread already holds a session for the named driver.
pub fn has_thread_session(driver_name: &str) -> bool {
    SESSIONS.with(|cell| {
        cell.try_borrow()
            .map(|sessions| sessions.contains_key(driver_name))
            .unwrap_or(true)
    })
}
