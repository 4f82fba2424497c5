use twine_core::Model;
use uom::si::f64::MassRate;

use super::{ComputeError, PortCapacity, Ports, UnitOperation, core, device::call_balance};

/// A reactor with one inlet and one or two outlets.
///
/// The feed is split equally across the declared outlets. Unlike the
/// [`Divider`](super::Divider), the split uses the declared capacity, so
/// every outlet must be attached before [`update_outputs`] runs.
///
/// [`update_outputs`]: UnitOperation::update_outputs
#[derive(Debug, Clone)]
pub struct Reactor {
    ports: Ports,
}

impl Reactor {
    /// Creates a reactor with two outlets if `is_double`, otherwise one.
    #[must_use]
    pub fn new(is_double: bool) -> Self {
        let outlets = if is_double { 2 } else { 1 };
        Self {
            ports: Ports::new(
                PortCapacity::new_unchecked(1),
                PortCapacity::new_unchecked(outlets),
            ),
        }
    }

    /// Creates a reactor with a single outlet.
    #[must_use]
    pub fn single() -> Self {
        Self::new(false)
    }

    /// Creates a reactor with two outlets.
    #[must_use]
    pub fn double() -> Self {
        Self::new(true)
    }

    /// Returns `true` if this reactor has two outlets.
    #[must_use]
    pub fn is_double(&self) -> bool {
        self.output_capacity() == 2
    }
}

impl UnitOperation for Reactor {
    fn kind(&self) -> &'static str {
        "reactor"
    }

    fn ports(&self) -> &Ports {
        &self.ports
    }

    fn ports_mut(&mut self) -> &mut Ports {
        &mut self.ports
    }

    fn balance(&self, inlets: &[MassRate]) -> Result<Vec<MassRate>, ComputeError> {
        core::react(inlets, self.output_count(), self.output_capacity())
    }
}

impl Model for Reactor {
    type Input = Vec<MassRate>;
    type Output = Vec<MassRate>;
    type Error = ComputeError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        call_balance(self, input)
    }
}
