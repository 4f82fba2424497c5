//! Mass-balance rules for each unit operation.
//!
//! These functions work on plain mass rates and port counts. They know
//! nothing about streams, which keeps them usable both by the stream-wired
//! `update_outputs` path and by the [`twine_core::Model`] adapters.

use uom::{ConstZero, si::f64::MassRate};

use super::{ComputeError, PortKind, PortOutOfRange};

/// Mixer balance: the inlet total, shared equally by every attached outlet.
///
/// No inlets is valid and yields zero flow.
pub(super) fn mix(inlets: &[MassRate], outlets: usize) -> Result<Vec<MassRate>, ComputeError> {
    if outlets == 0 {
        return Err(ComputeError::PrecursorMissing {
            kind: PortKind::Output,
        });
    }

    let total = inlets.iter().fold(MassRate::ZERO, |sum, &rate| sum + rate);
    Ok(split_evenly(total, outlets))
}

/// Divider balance: the first inlet, shared equally by every attached outlet.
pub(super) fn divide(inlets: &[MassRate], outlets: usize) -> Result<Vec<MassRate>, ComputeError> {
    let Some(&feed) = inlets.first() else {
        return Err(ComputeError::PrecursorMissing {
            kind: PortKind::Input,
        });
    };

    if outlets == 0 {
        return Err(ComputeError::PrecursorMissing {
            kind: PortKind::Output,
        });
    }

    Ok(split_evenly(feed, outlets))
}

/// Reactor balance: the first inlet, shared equally by every declared outlet.
///
/// The split is over the declared outlet capacity, so every declared
/// outlet must be attached.
pub(super) fn react(
    inlets: &[MassRate],
    outlets: usize,
    outlet_capacity: usize,
) -> Result<Vec<MassRate>, ComputeError> {
    let Some(&feed) = inlets.first() else {
        return Err(PortOutOfRange {
            kind: PortKind::Input,
            index: 0,
            attached: 0,
        }
        .into());
    };

    if outlets < outlet_capacity {
        return Err(PortOutOfRange {
            kind: PortKind::Output,
            index: outlets,
            attached: outlets,
        }
        .into());
    }

    Ok(split_evenly(feed, outlet_capacity))
}

/// Splits `total` into `parts` equal rates.
fn split_evenly(total: MassRate, parts: usize) -> Vec<MassRate> {
    debug_assert!(parts > 0);

    #[allow(clippy::cast_precision_loss)]
    let share = total / parts as f64;
    vec![share; parts]
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::mass_rate::kilogram_per_second;

    fn rates(values: &[f64]) -> Vec<MassRate> {
        values
            .iter()
            .map(|&v| MassRate::new::<kilogram_per_second>(v))
            .collect()
    }

    fn values(rates: &[MassRate]) -> Vec<f64> {
        rates.iter().map(|r| r.get::<kilogram_per_second>()).collect()
    }

    #[test]
    fn mix_sums_inlets() {
        let out = mix(&rates(&[10.0, 5.0, 2.5]), 1).unwrap();
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0].get::<kilogram_per_second>(), 17.5);
    }

    #[test]
    fn mix_spreads_over_attached_outlets() {
        let out = mix(&rates(&[6.0, 3.0]), 3).unwrap();
        for value in values(&out) {
            assert_relative_eq!(value, 3.0);
        }
    }

    #[test]
    fn mix_without_inlets_is_zero() {
        let out = mix(&[], 1).unwrap();
        assert_relative_eq!(out[0].get::<kilogram_per_second>(), 0.0);
    }

    #[test]
    fn mix_needs_an_outlet() {
        assert_eq!(
            mix(&rates(&[1.0]), 0),
            Err(ComputeError::PrecursorMissing {
                kind: PortKind::Output
            })
        );
    }

    #[test]
    fn divide_conserves_mass() {
        for outlets in 1..=6 {
            let out = divide(&rates(&[12.0]), outlets).unwrap();
            assert_eq!(out.len(), outlets);

            let total: f64 = values(&out).iter().sum();
            assert_relative_eq!(total, 12.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn divide_checks_inlet_before_outlet() {
        assert_eq!(
            divide(&[], 0),
            Err(ComputeError::PrecursorMissing {
                kind: PortKind::Input
            })
        );
        assert_eq!(
            divide(&rates(&[1.0]), 0),
            Err(ComputeError::PrecursorMissing {
                kind: PortKind::Output
            })
        );
    }

    #[test]
    fn react_splits_over_declared_capacity() {
        let out = react(&rates(&[10.0]), 2, 2).unwrap();
        assert_eq!(values(&out), [5.0, 5.0]);

        let out = react(&rates(&[10.0]), 1, 1).unwrap();
        assert_eq!(values(&out), [10.0]);
    }

    #[test]
    fn react_reports_first_missing_port() {
        assert_eq!(
            react(&[], 2, 2),
            Err(ComputeError::PortOutOfRange(PortOutOfRange {
                kind: PortKind::Input,
                index: 0,
                attached: 0,
            }))
        );
        assert_eq!(
            react(&rates(&[10.0]), 1, 2),
            Err(ComputeError::PortOutOfRange(PortOutOfRange {
                kind: PortKind::Output,
                index: 1,
                attached: 1,
            }))
        );
    }
}
