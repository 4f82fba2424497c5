//! Public flowsheet models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! Models are grouped into domain-specific submodules. Only [`process`]
//! exists today: steady-state mass-balance unit operations.
//!
//! # Model structure
//!
//! Each model family keeps its computation in an internal `core` module
//! that works on plain quantities. The stream-wired devices and the
//! [`twine_core::Model`] implementations are thin adapters over that core.

pub mod process;
