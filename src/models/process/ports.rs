use std::fmt;

use tracing::trace;
use uom::si::f64::MassRate;

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    stream::Stream,
};

use super::{PortLimitExceeded, PortOutOfRange};

/// Number of streams a side of a device can hold.
pub type PortCapacity = Constrained<usize, StrictlyPositive>;

/// Side of a device a port belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    Input,
    Output,
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Input => "input",
            Self::Output => "output",
        })
    }
}

/// How far a device has been wired, derived from its port lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wiring {
    /// No streams attached on either side.
    Unconfigured,
    /// Some streams attached, but at least one side is below capacity.
    PartiallyWired,
    /// Both sides are at capacity; further attachments fail.
    FullyWired,
}

/// Bounded, ordered input and output stream lists.
///
/// Port index equals attachment order. Capacities are fixed at
/// construction and the lists never grow past them.
#[derive(Debug, Clone)]
pub struct Ports {
    input_capacity: usize,
    output_capacity: usize,
    inputs: Vec<Stream>,
    outputs: Vec<Stream>,
}

impl Ports {
    /// Creates empty port lists with the given capacities.
    #[must_use]
    pub fn new(input_capacity: PortCapacity, output_capacity: PortCapacity) -> Self {
        let input_capacity = input_capacity.into_inner();
        let output_capacity = output_capacity.into_inner();
        Self {
            input_capacity,
            output_capacity,
            inputs: Vec::with_capacity(input_capacity),
            outputs: Vec::with_capacity(output_capacity),
        }
    }

    /// Declared capacity of one side.
    #[must_use]
    pub fn capacity(&self, kind: PortKind) -> usize {
        match kind {
            PortKind::Input => self.input_capacity,
            PortKind::Output => self.output_capacity,
        }
    }

    /// Streams attached on one side, in port order.
    #[must_use]
    pub fn streams(&self, kind: PortKind) -> &[Stream] {
        match kind {
            PortKind::Input => &self.inputs,
            PortKind::Output => &self.outputs,
        }
    }

    /// Number of streams attached on one side.
    #[must_use]
    pub fn count(&self, kind: PortKind) -> usize {
        self.streams(kind).len()
    }

    /// Attaches a stream to the next free port on one side.
    ///
    /// # Errors
    ///
    /// Returns [`PortLimitExceeded`] if that side is already at capacity.
    pub fn attach(&mut self, kind: PortKind, stream: Stream) -> Result<(), PortLimitExceeded> {
        let capacity = self.capacity(kind);
        let list = match kind {
            PortKind::Input => &mut self.inputs,
            PortKind::Output => &mut self.outputs,
        };

        if list.len() >= capacity {
            return Err(PortLimitExceeded { kind, capacity });
        }

        trace!(%kind, port = list.len(), stream = %stream.name(), "attached stream");
        list.push(stream);
        Ok(())
    }

    /// Returns the stream attached at `index` on one side.
    ///
    /// # Errors
    ///
    /// Returns [`PortOutOfRange`] if no stream is attached at that index.
    pub fn get(&self, kind: PortKind, index: usize) -> Result<&Stream, PortOutOfRange> {
        let streams = self.streams(kind);
        streams.get(index).ok_or(PortOutOfRange {
            kind,
            index,
            attached: streams.len(),
        })
    }

    /// Current wiring state.
    #[must_use]
    pub fn wiring(&self) -> Wiring {
        if self.inputs.is_empty() && self.outputs.is_empty() {
            Wiring::Unconfigured
        } else if self.inputs.len() == self.input_capacity
            && self.outputs.len() == self.output_capacity
        {
            Wiring::FullyWired
        } else {
            Wiring::PartiallyWired
        }
    }

    /// Mass flows of the attached inlet streams, in port order.
    pub(super) fn inlet_rates(&self) -> Vec<MassRate> {
        self.inputs.iter().map(Stream::mass_flow).collect()
    }

    /// Writes outlet mass flows in port order.
    ///
    /// Callers pass exactly one rate per attached outlet.
    pub(super) fn write_outlets(&self, rates: &[MassRate]) {
        debug_assert_eq!(rates.len(), self.outputs.len());
        for (stream, &rate) in self.outputs.iter().zip(rates) {
            stream.set_mass_flow(rate);
        }
    }
}
