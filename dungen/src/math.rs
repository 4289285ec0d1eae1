//! Mathematical utilities and decisions.
//!
//! Everything here is defined in the `dungen-base` crate and re-exported.

pub use dungen_base::math::*;
