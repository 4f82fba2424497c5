//! Steady-state unit operations connected by material streams.
//!
//! A device owns bounded lists of input and output [`Stream`] handles and
//! redistributes mass from its inlets to its outlets in a single,
//! synchronous step.
//!
//! - [`Mixer`]: many inlets into one outlet carrying their sum.
//! - [`Divider`]: one inlet split equally across the attached outlets.
//! - [`Reactor`]: one inlet split equally across one or two declared outlets.
//!
//! All three implement [`UnitOperation`], and [`Device`] gathers them into a
//! closed set. Each is also a [`twine_core::Model`] that maps inlet mass
//! rates to outlet mass rates without touching any stream.
//!
//! # Example
//!
//! ```
//! use twine_flowsheet::models::process::{Mixer, UnitOperation};
//! use twine_flowsheet::support::stream::StreamCounter;
//! use uom::si::{f64::MassRate, mass_rate::kilogram_per_second};
//!
//! let mut counter = StreamCounter::new();
//! let (a, b, product) = (counter.next_stream(), counter.next_stream(), counter.next_stream());
//! a.set_mass_flow(MassRate::new::<kilogram_per_second>(10.0));
//! b.set_mass_flow(MassRate::new::<kilogram_per_second>(5.0));
//!
//! let mut mixer = Mixer::new(2).unwrap();
//! mixer.add_input(a).unwrap();
//! mixer.add_input(b).unwrap();
//! mixer.add_output(product.clone()).unwrap();
//! mixer.update_outputs().unwrap();
//!
//! assert_eq!(product.mass_flow().get::<kilogram_per_second>(), 15.0);
//! ```
//!
//! [`Stream`]: crate::support::stream::Stream

mod balance;
mod core;
mod device;
mod divider;
mod error;
mod mixer;
mod ports;
mod reactor;

pub use balance::{BalanceConfig, ImbalanceError, MassBalance};
pub use device::{Device, UnitOperation};
pub use divider::Divider;
pub use error::{ComputeError, PortLimitExceeded, PortOutOfRange};
pub use mixer::Mixer;
pub use ports::{PortCapacity, PortKind, Ports, Wiring};
pub use reactor::Reactor;
