//! Data module: boundary-condition metadata attached to cell codes.

pub mod bc;

pub use bc::BoundaryConditions;
