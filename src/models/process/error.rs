use thiserror::Error;

use super::PortKind;

/// Returned when a stream is attached to a port list that is already full.
///
/// The port list is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} port limit exceeded: capacity is {capacity}")]
pub struct PortLimitExceeded {
    /// Which side of the device rejected the stream.
    pub kind: PortKind,
    /// Declared capacity of that side.
    pub capacity: usize,
}

/// Returned when a port index refers to a slot with no attached stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no {kind} stream at port {index}: {attached} attached")]
pub struct PortOutOfRange {
    /// Which side of the device was accessed.
    pub kind: PortKind,
    /// Requested port index.
    pub index: usize,
    /// Number of streams currently attached on that side.
    pub attached: usize,
}

/// Errors that can occur while computing outlet mass flows.
///
/// Every check runs before any outlet is written, so a failed computation
/// leaves all streams untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ComputeError {
    /// A port list the balance depends on has no streams attached.
    #[error("{kind} streams must be attached before updating outputs")]
    PrecursorMissing {
        /// The empty side of the device.
        kind: PortKind,
    },

    /// The balance reads or writes a port that has no stream attached.
    #[error(transparent)]
    PortOutOfRange(#[from] PortOutOfRange),

    /// More inlet rates were supplied than the device has input ports.
    #[error(transparent)]
    PortLimitExceeded(#[from] PortLimitExceeded),
}
