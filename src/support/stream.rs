//! Named material streams shared between unit operations.
//!
//! A [`Stream`] is a handle: cloning it yields another reference to the
//! same stream, so one device can write a stream that another device reads.
//! Handles are single-threaded (`!Send`); sequencing devices that share a
//! stream is the caller's job.

use std::{cell::RefCell, fmt, rc::Rc};

use uom::{
    ConstZero,
    si::{f64::MassRate, mass_rate::kilogram_per_second},
};

use crate::support::constraint::{Constrained, ConstraintResult, NonNegative};

/// A named carrier of a single mass-flow rate.
///
/// The mass flow starts at zero and is not validated when set; negative
/// values are accepted. Use [`Stream::non_negative_mass_flow`] when a
/// physically meaningful value is required.
///
/// # Example
///
/// ```
/// use twine_flowsheet::support::stream::Stream;
/// use uom::si::{f64::MassRate, mass_rate::kilogram_per_second};
///
/// let feed = Stream::new(1);
/// let same_feed = feed.clone();
///
/// feed.set_mass_flow(MassRate::new::<kilogram_per_second>(10.0));
///
/// assert_eq!(same_feed.name(), "s1");
/// assert_eq!(same_feed.mass_flow().get::<kilogram_per_second>(), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct Stream {
    inner: Rc<RefCell<StreamState>>,
}

#[derive(Debug)]
struct StreamState {
    name: String,
    mass_flow: MassRate,
}

impl Stream {
    /// Creates a stream named `s{seed}`.
    #[must_use]
    pub fn new(seed: usize) -> Self {
        Self::named(format!("s{seed}"))
    }

    /// Creates a stream with an explicit name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StreamState {
                name: name.into(),
                mass_flow: MassRate::ZERO,
            })),
        }
    }

    /// Returns the stream name.
    #[must_use]
    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    /// Renames the stream.
    pub fn set_name(&self, name: impl Into<String>) {
        self.inner.borrow_mut().name = name.into();
    }

    /// Returns the current mass-flow rate.
    #[must_use]
    pub fn mass_flow(&self) -> MassRate {
        self.inner.borrow().mass_flow
    }

    /// Sets the mass-flow rate.
    pub fn set_mass_flow(&self, mass_flow: MassRate) {
        self.inner.borrow_mut().mass_flow = mass_flow;
    }

    /// Returns the mass-flow rate if it is physically meaningful.
    ///
    /// # Errors
    ///
    /// Returns an error if the mass flow is negative or `NaN`.
    pub fn non_negative_mass_flow(&self) -> ConstraintResult<Constrained<MassRate, NonNegative>> {
        NonNegative::new(self.mass_flow())
    }

    /// Returns `true` if both handles refer to the same stream.
    #[must_use]
    pub fn same_stream(&self, other: &Stream) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        write!(
            f,
            "Stream {} flow = {} kg/s",
            state.name,
            state.mass_flow.get::<kilogram_per_second>()
        )
    }
}

/// Counter used to hand out sequential stream names.
///
/// Each call to [`StreamCounter::next_stream`] increments the counter
/// before naming the stream, so the first stream is `s1`.
/// Independent scenarios own their own counter, or [`reset`](Self::reset) it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamCounter {
    count: usize,
}

impl StreamCounter {
    /// Creates a counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the counter and creates a stream named after it.
    pub fn next_stream(&mut self) -> Stream {
        self.count += 1;
        Stream::new(self.count)
    }

    /// Number of streams named so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the counter to zero.
    pub fn reset(&mut self) {
        self.count = 0;
    }
}
