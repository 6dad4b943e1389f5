//! Diagnostic reporting for endpoint calls.
//!
//! The client never raises on remote failures. Instead it reports a
//! [`DiagnosticEvent`] through an injected [`Diagnostics`] implementation and
//! returns a null-equivalent to the caller. The default implementation
//! forwards events to `tracing`; [`MemoryDiagnostics`] keeps them in memory
//! so callers (and tests) can inspect what was reported.

use std::sync::{Arc, Mutex};

/// Severity of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// A successful write worth recording (ticket created, user updated).
    Info,
    /// A remote or transport failure surfaced as `None`/`false`.
    Warn,
}

/// One event reported by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEvent {
    /// Severity.
    pub level: Level,
    /// Remote endpoint name (e.g., `Ticket`, `UpdateUser`).
    pub endpoint: String,
    /// HTTP status code, if a response was received.
    pub status: Option<u16>,
    /// Human-readable description. Never contains the password.
    pub message: String,
}

impl DiagnosticEvent {
    /// Creates a warning event.
    pub fn warn(endpoint: &str, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            level: Level::Warn,
            endpoint: endpoint.to_string(),
            status,
            message: message.into(),
        }
    }

    /// Creates an informational event.
    pub fn info(endpoint: &str, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            endpoint: endpoint.to_string(),
            status,
            message: message.into(),
        }
    }
}

/// Sink for diagnostic events emitted by [`JitbitClient`](crate::client::JitbitClient).
pub trait Diagnostics: Send + Sync {
    /// Records one event.
    fn report(&self, event: DiagnosticEvent);
}

/// Forwards events to `tracing` with structured `endpoint` and `status` fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, event: DiagnosticEvent) {
        let status = event.status.map(|s| s.to_string()).unwrap_or_default();
        match event.level {
            Level::Info => tracing::info!(
                endpoint = %event.endpoint,
                status = %status,
                "{}",
                event.message
            ),
            Level::Warn => tracing::warn!(
                endpoint = %event.endpoint,
                status = %status,
                "{}",
                event.message
            ),
        }
    }
}

/// Keeps every reported event in memory.
///
/// Cloning shares the underlying buffer, so a clone handed to the client
/// can be inspected through the original.
#[derive(Debug, Clone, Default)]
pub struct MemoryDiagnostics {
    events: Arc<Mutex<Vec<DiagnosticEvent>>>,
}

impl MemoryDiagnostics {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all events reported so far.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Returns only the warning events.
    pub fn warnings(&self) -> Vec<DiagnosticEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == Level::Warn)
            .collect()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn report(&self, event: DiagnosticEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
