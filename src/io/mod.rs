//! Boundary with profile file readers: valid ranges, masking and curtain assembly

pub mod profile;

pub use profile::{assemble_extinction_grid, ProfileColumns, ValidRange, EXTINCTION_COEFFICIENT_532};
