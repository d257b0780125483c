//! Numeric helpers shared by the order model, the configuration and the
//! validity checks.

pub mod basis_points;
pub mod serialization;
pub mod units;
