//! mn-core: numeric foundation for matchnet.
//!
//! Contains:
//! - complex (immutable complex value + free arithmetic functions)
//! - swr (scalar standing-wave ratio)
//! - line (lossless transmission-line impedance transform)
//! - units (uom SI types + constructors)
//! - numeric (Real + float helpers)
//! - error (shared error types)

pub mod complex;
pub mod error;
pub mod line;
pub mod numeric;
pub mod swr;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use complex::{Complex, Impedance, add, divide, invert, magnitude, multiply, scale, sub};
pub use error::{CoreError, CoreResult};
pub use line::{electrical_angle, transform_impedance};
pub use numeric::*;
pub use swr::{SWR_CEILING, reflection_magnitude, swr};
