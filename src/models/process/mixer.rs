use twine_core::Model;
use uom::si::f64::MassRate;

use crate::support::constraint::ConstraintResult;

use super::{ComputeError, PortCapacity, Ports, UnitOperation, core, device::call_balance};

/// Combines any number of inlets into a single outlet.
///
/// The outlet carries the sum of every attached inlet. The balance is
/// written over the attached outlet count, so the total is shared equally
/// should a mixer ever be built with more than one outlet.
#[derive(Debug, Clone)]
pub struct Mixer {
    ports: Ports,
}

impl Mixer {
    /// Outlet ports on every mixer.
    pub const OUTLETS: usize = 1;

    /// Creates a mixer with `input_capacity` inlet ports.
    ///
    /// # Errors
    ///
    /// Returns an error if `input_capacity` is zero.
    pub fn new(input_capacity: usize) -> ConstraintResult<Self> {
        Ok(Self::from_capacity(PortCapacity::new(input_capacity)?))
    }

    /// Creates a mixer from a pre-validated inlet capacity.
    #[must_use]
    pub fn from_capacity(input_capacity: PortCapacity) -> Self {
        Self {
            ports: Ports::new(input_capacity, PortCapacity::new_unchecked(Self::OUTLETS)),
        }
    }
}

impl UnitOperation for Mixer {
    fn kind(&self) -> &'static str {
        "mixer"
    }

    fn ports(&self) -> &Ports {
        &self.ports
    }

    fn ports_mut(&mut self) -> &mut Ports {
        &mut self.ports
    }

    fn balance(&self, inlets: &[MassRate]) -> Result<Vec<MassRate>, ComputeError> {
        core::mix(inlets, self.output_count())
    }
}

impl Model for Mixer {
    type Input = Vec<MassRate>;
    type Output = Vec<MassRate>;
    type Error = ComputeError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        call_balance(self, input)
    }
}
