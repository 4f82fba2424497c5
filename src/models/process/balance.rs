use thiserror::Error;
use uom::{
    ConstZero,
    si::{f64::MassRate, mass_rate::kilogram_per_second},
};

use crate::support::constraint::{Constrained, NonNegative};

use super::{PortKind, UnitOperation};

/// Configuration for mass conservation checks.
#[derive(Debug, Clone, Copy)]
pub struct BalanceConfig {
    /// Largest accepted absolute difference between outlet and inlet totals.
    pub tolerance: Constrained<MassRate, NonNegative>,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            tolerance: Constrained::new_unchecked(MassRate::new::<kilogram_per_second>(0.01)),
        }
    }
}

/// Returned when outlet and inlet totals differ by more than the tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("mass imbalance: inlet={inlet:?}, outlet={outlet:?}, tolerance={tolerance:?}")]
pub struct ImbalanceError {
    pub inlet: MassRate,
    pub outlet: MassRate,
    pub tolerance: MassRate,
}

/// Inlet and outlet mass-flow totals of a device, read from its streams.
///
/// # Example
///
/// ```
/// use twine_flowsheet::models::process::{BalanceConfig, Divider, MassBalance, UnitOperation};
/// use twine_flowsheet::support::stream::StreamCounter;
/// use uom::si::{f64::MassRate, mass_rate::kilogram_per_second};
///
/// let mut counter = StreamCounter::new();
/// let mut divider = Divider::new(3).unwrap();
///
/// let feed = counter.next_stream();
/// feed.set_mass_flow(MassRate::new::<kilogram_per_second>(12.0));
/// divider.add_input(feed).unwrap();
/// for _ in 0..3 {
///     divider.add_output(counter.next_stream()).unwrap();
/// }
///
/// divider.update_outputs().unwrap();
/// assert!(MassBalance::of(&divider).check(&BalanceConfig::default()).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBalance {
    pub inlet: MassRate,
    pub outlet: MassRate,
}

impl MassBalance {
    /// Totals the attached inlet and outlet streams of `device`.
    pub fn of(device: &impl UnitOperation) -> Self {
        let total = |kind| {
            device
                .ports()
                .streams(kind)
                .iter()
                .fold(MassRate::ZERO, |sum, stream| sum + stream.mass_flow())
        };

        Self {
            inlet: total(PortKind::Input),
            outlet: total(PortKind::Output),
        }
    }

    /// Outlet total minus inlet total.
    #[must_use]
    pub fn residual(&self) -> MassRate {
        self.outlet - self.inlet
    }

    /// Checks that the residual is within the configured tolerance.
    ///
    /// # Errors
    ///
    /// Returns an [`ImbalanceError`] if the residual magnitude exceeds the
    /// tolerance or is not a number.
    pub fn check(&self, config: &BalanceConfig) -> Result<(), ImbalanceError> {
        let tolerance = *config.tolerance.as_ref();
        if self.residual().abs() <= tolerance {
            Ok(())
        } else {
            Err(ImbalanceError {
                inlet: self.inlet,
                outlet: self.outlet,
                tolerance,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        models::process::{Mixer, Reactor},
        support::stream::StreamCounter,
    };

    fn kg_per_s(value: f64) -> MassRate {
        MassRate::new::<kilogram_per_second>(value)
    }

    #[test]
    fn default_tolerance_is_one_hundredth() {
        let config = BalanceConfig::default();
        assert_relative_eq!(
            config.tolerance.into_inner().get::<kilogram_per_second>(),
            0.01
        );
    }

    #[test]
    fn mixer_balance_closes_after_update() {
        let mut counter = StreamCounter::new();
        let mut mixer = Mixer::new(3).unwrap();
        for rate in [1.0, 2.0, 3.5] {
            let feed = counter.next_stream();
            feed.set_mass_flow(kg_per_s(rate));
            mixer.add_input(feed).unwrap();
        }
        mixer.add_output(counter.next_stream()).unwrap();

        let before = MassBalance::of(&mixer);
        assert_relative_eq!(before.residual().get::<kilogram_per_second>(), -6.5);
        assert!(before.check(&BalanceConfig::default()).is_err());

        mixer.update_outputs().unwrap();

        let after = MassBalance::of(&mixer);
        assert_relative_eq!(after.inlet.get::<kilogram_per_second>(), 6.5);
        assert!(after.check(&BalanceConfig::default()).is_ok());
    }

    #[test]
    fn reports_totals_on_imbalance() {
        let mut counter = StreamCounter::new();
        let mut reactor = Reactor::single();
        let feed = counter.next_stream();
        let product = counter.next_stream();
        feed.set_mass_flow(kg_per_s(10.0));
        product.set_mass_flow(kg_per_s(9.0));
        reactor.add_input(feed).unwrap();
        reactor.add_output(product).unwrap();

        let loose = BalanceConfig {
            tolerance: NonNegative::new(kg_per_s(2.0)).unwrap(),
        };
        assert!(MassBalance::of(&reactor).check(&loose).is_ok());

        let err = MassBalance::of(&reactor)
            .check(&BalanceConfig::default())
            .unwrap_err();
        assert_eq!(err.inlet, kg_per_s(10.0));
        assert_eq!(err.outlet, kg_per_s(9.0));
    }
}
