//! Crate-wide error taxonomy.
//!
//! `CoreError` is the single matchable error surface for both the resolver
//! and the simulator. Nothing here is retried internally: a caller sees every
//! failure exactly once, with enough context to build a diagnostic.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The trace contains no tokens at all — the kernel invocation never ran.
    #[error("kernel did not run: trace is empty")]
    KernelDidNotRun,

    /// The trace ended with frames still open on the call stack.
    #[error("trace ended with {open_frames} frame(s) still open")]
    IncompleteTrace { open_frames: usize },

    /// A token appeared where the static schedule didn't expect it.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// A `fifo_read`/`fifo_write`/AXI response token referenced a request that
    /// was never issued.
    #[error("no pending {operation} request on interface at {interface_address:#x}")]
    MissingAxiRequest {
        interface_address: u64,
        operation: &'static str,
    },

    /// No frame can make progress: the global unstall search found nothing.
    #[error("deadlock detected: {0}")]
    Deadlock(Box<DeadlockReport>),

    /// An internal consistency check failed — this indicates a bug in the
    /// resolver/simulator itself, not a malformed trace.
    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}

/// Diagnostic snapshot captured at the moment a deadlock is detected.
#[derive(Debug)]
pub struct DeadlockReport {
    /// Path from the top-level frame down to the frame the report focuses on,
    /// expressed as successive call-event indices.
    pub top_frame_path: Vec<usize>,
    pub blocked_frames: Vec<BlockedFrameInfo>,
    pub fifo_snapshot: Vec<FifoSnapshot>,
}

impl fmt::Display for DeadlockReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} frame(s) blocked", self.blocked_frames.len())?;
        for frame in &self.blocked_frames {
            writeln!(f, "  - {frame}")?;
        }
        for fifo in &self.fifo_snapshot {
            writeln!(f, "  fifo {}", fifo)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct BlockedFrameInfo {
    pub path: Vec<usize>,
    pub waiting_on: String,
    pub stage: i64,
}

impl fmt::Display for BlockedFrameInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {:?} at stage {} waiting on {}",
            self.path, self.stage, self.waiting_on
        )
    }
}

#[derive(Debug)]
pub struct FifoSnapshot {
    pub channel_id: u32,
    pub occupancy: usize,
    pub depth: usize,
}

impl fmt::Display for FifoSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "channel {}: {}/{} occupied",
            self.channel_id, self.occupancy, self.depth
        )
    }
}
