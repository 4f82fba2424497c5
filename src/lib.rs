//! # Twine Flowsheet
//!
//! Steady-state mass-balance unit operations for process flowsheets,
//! usable directly or as [Twine](https://github.com/isentropic-dev/twine)
//! models.
//!
//! ## Crate layout
//!
//! - [`models`]: Unit operations (mixer, divider, reactor) and their
//!   [`twine_core::Model`] implementations.
//! - [`support`]: Streams and numeric constraints used by the models.
//!
//! ## Scope
//!
//! Streams carry a single mass-flow rate. There is no composition, no
//! energy balance, and no flowsheet solver: callers wire devices together
//! through shared [`support::stream::Stream`] handles and run them in
//! order.
//!
//! ## Logging
//!
//! Devices emit [`tracing`] events (`debug` on each outlet update, `trace`
//! on each port attachment). Install a subscriber to see them.

pub mod models;
pub mod support;
