use twine_core::Model;
use uom::si::f64::MassRate;

use crate::support::constraint::ConstraintResult;

use super::{ComputeError, PortCapacity, Ports, UnitOperation, core, device::call_balance};

/// Splits one inlet equally across its outlets.
///
/// The split uses the number of outlets attached when the balance runs,
/// not the declared capacity, so a partially wired divider still conserves
/// mass.
#[derive(Debug, Clone)]
pub struct Divider {
    ports: Ports,
}

impl Divider {
    /// Inlet ports on every divider.
    pub const INLETS: usize = 1;

    /// Creates a divider with `output_capacity` outlet ports.
    ///
    /// # Errors
    ///
    /// Returns an error if `output_capacity` is zero.
    pub fn new(output_capacity: usize) -> ConstraintResult<Self> {
        Ok(Self::from_capacity(PortCapacity::new(output_capacity)?))
    }

    /// Creates a divider from a pre-validated outlet capacity.
    #[must_use]
    pub fn from_capacity(output_capacity: PortCapacity) -> Self {
        Self {
            ports: Ports::new(PortCapacity::new_unchecked(Self::INLETS), output_capacity),
        }
    }
}

impl UnitOperation for Divider {
    fn kind(&self) -> &'static str {
        "divider"
    }

    fn ports(&self) -> &Ports {
        &self.ports
    }

    fn ports_mut(&mut self) -> &mut Ports {
        &mut self.ports
    }

    fn balance(&self, inlets: &[MassRate]) -> Result<Vec<MassRate>, ComputeError> {
        core::divide(inlets, self.output_count())
    }
}

impl Model for Divider {
    type Input = Vec<MassRate>;
    type Output = Vec<MassRate>;
    type Error = ComputeError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        call_balance(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use uom::si::mass_rate::kilogram_per_second;

    use crate::{
        models::process::{PortKind, PortLimitExceeded},
        support::stream::{Stream, StreamCounter},
    };

    const TOLERANCE: f64 = 0.01;

    fn kg_per_s(value: f64) -> MassRate {
        MassRate::new::<kilogram_per_second>(value)
    }

    fn flow(stream: &Stream) -> f64 {
        stream.mass_flow().get::<kilogram_per_second>()
    }

    /// Wires a divider with a single feed and `outlets` attached outlets.
    fn wired(capacity: usize, feed_rate: f64, outlets: usize) -> (Divider, Stream, Vec<Stream>) {
        let mut counter = StreamCounter::new();
        let mut divider = Divider::new(capacity).unwrap();

        let feed = counter.next_stream();
        feed.set_mass_flow(kg_per_s(feed_rate));
        divider.add_input(feed.clone()).unwrap();

        let products: Vec<_> = (0..outlets).map(|_| counter.next_stream()).collect();
        for product in &products {
            divider.add_output(product.clone()).unwrap();
        }

        (divider, feed, products)
    }

    #[test]
    fn divides_flow_equally() {
        let (divider, _, products) = wired(3, 12.0, 3);

        divider.update_outputs().unwrap();

        for product in &products {
            assert_abs_diff_eq!(flow(product), 4.0, epsilon = TOLERANCE);
        }
    }

    #[test]
    fn conserves_mass() {
        let (divider, feed, products) = wired(2, 10.0, 2);

        divider.update_outputs().unwrap();

        let total: f64 = products.iter().map(flow).sum();
        assert_abs_diff_eq!(total, flow(&feed), epsilon = TOLERANCE);
    }

    #[test]
    fn single_output_passes_flow_through() {
        let (divider, _, products) = wired(1, 8.0, 1);

        divider.update_outputs().unwrap();

        assert_abs_diff_eq!(flow(&products[0]), 8.0, epsilon = TOLERANCE);
    }

    #[test]
    fn splits_over_attached_outlets_not_capacity() {
        let (divider, _, products) = wired(4, 9.0, 3);

        divider.update_outputs().unwrap();

        for product in &products {
            assert_abs_diff_eq!(flow(product), 3.0, epsilon = TOLERANCE);
        }
    }

    #[test]
    fn fails_without_input() {
        let mut divider = Divider::new(2).unwrap();
        let product = Stream::new(1);
        product.set_mass_flow(kg_per_s(1.5));
        divider.add_output(product.clone()).unwrap();

        assert_eq!(
            divider.update_outputs(),
            Err(ComputeError::PrecursorMissing {
                kind: PortKind::Input
            })
        );
        assert_abs_diff_eq!(flow(&product), 1.5);
    }

    #[test]
    fn fails_without_outputs() {
        let (divider, feed, _) = wired(2, 10.0, 0);

        assert_eq!(
            divider.update_outputs(),
            Err(ComputeError::PrecursorMissing {
                kind: PortKind::Output
            })
        );
        assert_abs_diff_eq!(flow(&feed), 10.0);
    }

    #[test]
    fn rejects_second_input() {
        let (mut divider, feed, _) = wired(2, 10.0, 0);

        assert_eq!(
            divider.add_input(Stream::new(9)),
            Err(PortLimitExceeded {
                kind: PortKind::Input,
                capacity: 1,
            })
        );
        assert_eq!(divider.input_count(), 1);
        assert!(divider.input(0).unwrap().same_stream(&feed));
    }

    #[test]
    fn repeated_updates_match() {
        let (divider, _, products) = wired(3, 7.0, 3);

        divider.update_outputs().unwrap();
        let first: Vec<_> = products.iter().map(flow).collect();
        divider.update_outputs().unwrap();
        let second: Vec<_> = products.iter().map(flow).collect();

        assert_eq!(first, second);
    }
}
