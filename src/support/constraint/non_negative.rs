use std::{cmp::Ordering, marker::PhantomData, ops::Add};

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is zero or greater.
///
/// Mass flows and balance tolerances use this constraint when a caller
/// wants a physically meaningful value.
///
/// # Examples
///
/// ```
/// use twine_flowsheet::support::constraint::{Constrained, NonNegative};
/// use uom::si::{f64::MassRate, mass_rate::kilogram_per_second};
///
/// let tol = NonNegative::new(MassRate::new::<kilogram_per_second>(0.01)).unwrap();
/// assert_eq!(tol.into_inner().get::<kilogram_per_second>(), 0.01);
///
/// assert!(Constrained::<_, NonNegative>::new(0).is_ok());
/// assert!(NonNegative::new(-7.5).is_err());
/// assert!(NonNegative::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }

    /// Returns zero as a non-negative constrained value.
    #[must_use]
    pub fn zero<T: PartialOrd + Zero>() -> Constrained<T, NonNegative> {
        Constrained::<T, NonNegative>::zero()
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Adds two non-negative values.
///
/// # Panics
///
/// Panics in debug builds if the sum is unexpectedly negative.
impl<T> Add for Constrained<T, NonNegative>
where
    T: Add<Output = T> + PartialOrd + Zero,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let value = self.value + rhs.value;
        debug_assert!(
            value >= T::zero(),
            "Addition produced a negative value, violating NonNegative bound invariant"
        );
        Self {
            value,
            _marker: PhantomData,
        }
    }
}

impl<T> Zero for Constrained<T, NonNegative>
where
    T: PartialOrd + Zero,
{
    fn zero() -> Self {
        Self {
            value: T::zero(),
            _marker: PhantomData,
        }
    }

    fn is_zero(&self) -> bool {
        self.value == T::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::MassRate, mass_rate::kilogram_per_second};

    #[test]
    fn floats() {
        assert!(NonNegative::new(2.0).is_ok());
        assert!(NonNegative::new(0.0).is_ok());
        assert_eq!(NonNegative::new(-2.0), Err(ConstraintError::Negative));
        assert_eq!(NonNegative::new(f64::NAN), Err(ConstraintError::NotANumber));
    }

    #[test]
    fn mass_rates() {
        let rate = |v| MassRate::new::<kilogram_per_second>(v);

        assert!(NonNegative::new(rate(5.0)).is_ok());
        assert!(NonNegative::new(rate(0.0)).is_ok());
        assert!(NonNegative::new(rate(-2.0)).is_err());
    }

    #[test]
    fn summed_mass_rates_stay_non_negative() {
        let flows = [4.0, 0.0, 6.5]
            .map(|v| NonNegative::new(MassRate::new::<kilogram_per_second>(v)).unwrap());

        let total: Constrained<MassRate, NonNegative> = flows.into_iter().sum();

        assert_relative_eq!(total.into_inner().get::<kilogram_per_second>(), 10.5);
        assert!(NonNegative::zero::<MassRate>().is_zero());
    }
}
