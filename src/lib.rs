#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

//! Dancing Links, generalised to Exact Cover with Colors.
//!
//! - [`arena`] is the index-addressed link structure the rest of the crate
//!   mutates in place.
//! - [`ops`] holds every reversible primitive (`hide`/`unhide`,
//!   `cover`/`uncover` and their coloured twins, `purify`/`unpurify`,
//!   `commit`/`uncommit`, `tweak`/`untweak`).
//! - [`builder`] is the ordered construction API that turns item and option
//!   declarations into a populated [`arena::Arena`].
//! - [`heuristic`] selects the next item to branch on.
//! - [`driver`] runs Algorithm C as a resumable state machine.
//! - [`solution`] recovers option ordinals from a completed branch.
//! - [`text`] reads the `<primary> [secondary] option;` problem format.
//! - [`error`] collects every fallible outcome above.

pub mod arena;
pub mod builder;
pub mod driver;
pub mod error;
pub mod heuristic;
pub mod ops;
pub mod solution;
pub mod text;

pub use builder::Builder;
pub use driver::Driver;
pub use error::{BuildError, ReadError, SolveError};
pub use heuristic::Heuristic;
pub use solution::Solution;
