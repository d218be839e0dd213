//! compression/backend.rs
//! Runtime choice between the software and hardware-offload gzip backends.
//!
//! The choice comes from one environment-style string. Recognized values:
//! empty/unset picks software, `QAT` (any ASCII case, not trimmed) picks the
//! accelerator when it is built and a driver is installed. Anything else is
//! not an error: it logs a warning and falls back to software.
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::compression::accelerator::AcceleratorDriver;
use crate::compression::constants::{GZIP_BACKEND_ENV, QAT_BACKEND_LABEL};
use crate::compression::types::{BackendKind, Format};

/// Snapshot of the backend setting. Read per construction call, never cached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackendConfig {
    raw: Option<String>,
}

impl BackendConfig {
    pub fn from_env() -> Self {
        Self { raw: std::env::var(GZIP_BACKEND_ENV).ok() }
    }

    pub fn from_value(value: Option<&str>) -> Self {
        Self { raw: value.map(str::to_string) }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Decide the backend for a codec of `format`. Logs at most one warning.
    pub fn select(&self, format: Format) -> BackendSelection {
        let value = self.raw.as_deref().unwrap_or("");
        let selection = if value.is_empty() {
            BackendSelection::software(None)
        } else if value.eq_ignore_ascii_case(QAT_BACKEND_LABEL) {
            accelerator_selection(QAT_BACKEND_LABEL, format)
        } else {
            BackendSelection::software(Some(ConfigWarning::InvalidBackend { value: value.to_string() }))
        };

        if let Some(warning) = &selection.warning {
            warn!(setting = GZIP_BACKEND_ENV, "{}", warning);
        }
        debug!(backend = ?selection.kind(), "selected gzip backend");
        selection
    }
}

#[cfg(feature = "qat")]
fn accelerator_selection(label: &str, format: Format) -> BackendSelection {
    use crate::compression::accelerator::installed_accelerator_driver;

    if format != Format::Gzip {
        return BackendSelection::software(Some(ConfigWarning::UnsupportedFormat {
            label: label.to_string(),
            format,
        }));
    }
    match installed_accelerator_driver() {
        Some(driver) => BackendSelection { backend: SelectedBackend::Accelerated(driver), warning: None },
        None => BackendSelection::software(Some(ConfigWarning::NoDriver { label: label.to_string() })),
    }
}

#[cfg(not(feature = "qat"))]
fn accelerator_selection(label: &str, _format: Format) -> BackendSelection {
    BackendSelection::software(Some(ConfigWarning::NotBuilt { label: label.to_string() }))
}

/// Why a configured backend was not honored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The label is recognized but this build lacks the backend.
    NotBuilt { label: String },
    /// Built in, but no accelerator driver has been installed.
    NoDriver { label: String },
    /// The accelerator only emits gzip framing.
    UnsupportedFormat { label: String, format: Format },
    /// Unrecognized value.
    InvalidBackend { value: String },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::NotBuilt { label } =>
                write!(f, "support for gzip backend {} not built, using software", label),
            ConfigWarning::NoDriver { label } =>
                write!(f, "gzip backend {} requested but no accelerator driver is installed, using software", label),
            ConfigWarning::UnsupportedFormat { label, format } =>
                write!(f, "gzip backend {} cannot produce {:?} framing, using software", label, format),
            ConfigWarning::InvalidBackend { value } =>
                write!(f, "invalid backend for {}: {}, only {} is supported", GZIP_BACKEND_ENV, value, QAT_BACKEND_LABEL),
        }
    }
}

pub enum SelectedBackend {
    Software,
    Accelerated(Arc<dyn AcceleratorDriver>),
}

/// Outcome of `BackendConfig::select`.
pub struct BackendSelection {
    pub backend: SelectedBackend,
    pub warning: Option<ConfigWarning>,
}

impl BackendSelection {
    fn software(warning: Option<ConfigWarning>) -> Self {
        Self { backend: SelectedBackend::Software, warning }
    }

    pub fn kind(&self) -> BackendKind {
        match self.backend {
            SelectedBackend::Software => BackendKind::Software,
            SelectedBackend::Accelerated(_) => BackendKind::Accelerated,
        }
    }
}

impl fmt::Debug for BackendSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let driver = match &self.backend {
            SelectedBackend::Software => None,
            SelectedBackend::Accelerated(driver) => Some(driver.name()),
        };
        f.debug_struct("BackendSelection")
            .field("kind", &self.kind())
            .field("driver", &driver)
            .field("warning", &self.warning)
            .finish()
    }
}
