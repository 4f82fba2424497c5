use tracing::debug;
use twine_core::Model;
use uom::{
    ConstZero,
    si::{f64::MassRate, mass_rate::kilogram_per_second},
};

use crate::support::stream::Stream;

use super::{
    ComputeError, Divider, Mixer, PortKind, PortLimitExceeded, PortOutOfRange, Ports, Reactor,
    Wiring,
};

/// Contract shared by every unit operation.
///
/// Implementors supply their port lists and a mass balance over inlet
/// rates. Everything else, including the stream-wired
/// [`update_outputs`](UnitOperation::update_outputs), is provided.
pub trait UnitOperation {
    /// Short lowercase label for the device kind, e.g. `"mixer"`.
    fn kind(&self) -> &'static str;

    /// The device's port lists.
    fn ports(&self) -> &Ports;

    /// Mutable access to the device's port lists.
    fn ports_mut(&mut self) -> &mut Ports;

    /// Outlet mass flows for the given inlet mass flows.
    ///
    /// Uses the currently attached outlets to decide how many rates to
    /// return. Never touches streams.
    ///
    /// # Errors
    ///
    /// Returns a [`ComputeError`] if the device is not wired well enough
    /// for its balance.
    fn balance(&self, inlets: &[MassRate]) -> Result<Vec<MassRate>, ComputeError>;

    /// Attaches a stream to the next free input port.
    ///
    /// # Errors
    ///
    /// Returns [`PortLimitExceeded`] if every input port is taken.
    fn add_input(&mut self, stream: Stream) -> Result<(), PortLimitExceeded> {
        self.ports_mut().attach(PortKind::Input, stream)
    }

    /// Attaches a stream to the next free output port.
    ///
    /// # Errors
    ///
    /// Returns [`PortLimitExceeded`] if every output port is taken.
    fn add_output(&mut self, stream: Stream) -> Result<(), PortLimitExceeded> {
        self.ports_mut().attach(PortKind::Output, stream)
    }

    /// Stream attached at input port `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PortOutOfRange`] if no stream is attached there.
    fn input(&self, index: usize) -> Result<&Stream, PortOutOfRange> {
        self.ports().get(PortKind::Input, index)
    }

    /// Stream attached at output port `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PortOutOfRange`] if no stream is attached there.
    fn output(&self, index: usize) -> Result<&Stream, PortOutOfRange> {
        self.ports().get(PortKind::Output, index)
    }

    fn input_count(&self) -> usize {
        self.ports().count(PortKind::Input)
    }

    fn output_count(&self) -> usize {
        self.ports().count(PortKind::Output)
    }

    fn input_capacity(&self) -> usize {
        self.ports().capacity(PortKind::Input)
    }

    fn output_capacity(&self) -> usize {
        self.ports().capacity(PortKind::Output)
    }

    fn wiring(&self) -> Wiring {
        self.ports().wiring()
    }

    /// Reads every inlet stream and writes every outlet stream.
    ///
    /// Inlet streams are never modified. Calling this again with unchanged
    /// inlets writes the same outlet values.
    ///
    /// # Errors
    ///
    /// Returns a [`ComputeError`] if the balance cannot be evaluated.
    /// No outlet is written in that case.
    fn update_outputs(&self) -> Result<(), ComputeError> {
        let inlets = self.ports().inlet_rates();
        let outlets = self.balance(&inlets)?;
        self.ports().write_outlets(&outlets);

        let inlet_total = inlets.iter().fold(MassRate::ZERO, |sum, &rate| sum + rate);
        debug!(
            device = self.kind(),
            inlets = inlets.len(),
            outlets = outlets.len(),
            inlet_total_kg_per_s = inlet_total.get::<kilogram_per_second>(),
            "updated outlet mass flows"
        );
        Ok(())
    }
}

/// Checks inlet count against capacity, then evaluates the balance.
///
/// Shared by the [`Model`] adapters of every device.
pub(super) fn call_balance(
    device: &impl UnitOperation,
    inlets: &[MassRate],
) -> Result<Vec<MassRate>, ComputeError> {
    let capacity = device.input_capacity();
    if inlets.len() > capacity {
        return Err(PortLimitExceeded {
            kind: PortKind::Input,
            capacity,
        }
        .into());
    }
    device.balance(inlets)
}

/// A unit operation of any supported kind.
///
/// The set of device kinds is closed; dispatch is an exhaustive match.
///
/// # Example
///
/// ```
/// use twine_flowsheet::models::process::{Device, Divider, UnitOperation};
/// use twine_flowsheet::support::stream::StreamCounter;
/// use uom::si::{f64::MassRate, mass_rate::kilogram_per_second};
///
/// let mut counter = StreamCounter::new();
/// let mut device = Device::from(Divider::new(2).unwrap());
///
/// let feed = counter.next_stream();
/// feed.set_mass_flow(MassRate::new::<kilogram_per_second>(10.0));
/// device.add_input(feed).unwrap();
/// device.add_output(counter.next_stream()).unwrap();
/// device.add_output(counter.next_stream()).unwrap();
///
/// device.update_outputs().unwrap();
/// assert_eq!(device.output(1).unwrap().mass_flow().get::<kilogram_per_second>(), 5.0);
/// ```
#[derive(Debug, Clone)]
pub enum Device {
    Mixer(Mixer),
    Divider(Divider),
    Reactor(Reactor),
}

impl UnitOperation for Device {
    fn kind(&self) -> &'static str {
        match self {
            Self::Mixer(mixer) => mixer.kind(),
            Self::Divider(divider) => divider.kind(),
            Self::Reactor(reactor) => reactor.kind(),
        }
    }

    fn ports(&self) -> &Ports {
        match self {
            Self::Mixer(mixer) => mixer.ports(),
            Self::Divider(divider) => divider.ports(),
            Self::Reactor(reactor) => reactor.ports(),
        }
    }

    fn ports_mut(&mut self) -> &mut Ports {
        match self {
            Self::Mixer(mixer) => mixer.ports_mut(),
            Self::Divider(divider) => divider.ports_mut(),
            Self::Reactor(reactor) => reactor.ports_mut(),
        }
    }

    fn balance(&self, inlets: &[MassRate]) -> Result<Vec<MassRate>, ComputeError> {
        match self {
            Self::Mixer(mixer) => mixer.balance(inlets),
            Self::Divider(divider) => divider.balance(inlets),
            Self::Reactor(reactor) => reactor.balance(inlets),
        }
    }
}

impl From<Mixer> for Device {
    fn from(mixer: Mixer) -> Self {
        Self::Mixer(mixer)
    }
}

impl From<Divider> for Device {
    fn from(divider: Divider) -> Self {
        Self::Divider(divider)
    }
}

impl From<Reactor> for Device {
    fn from(reactor: Reactor) -> Self {
        Self::Reactor(reactor)
    }
}

impl Model for Device {
    type Input = Vec<MassRate>;
    type Output = Vec<MassRate>;
    type Error = ComputeError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        call_balance(self, input)
    }
}
