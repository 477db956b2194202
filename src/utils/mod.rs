//! Utility functions and helpers.

pub mod matrix_convert;

pub use matrix_convert::{
    nalgebra_to_ndarray, ndarray_to_nalgebra, ndarray_to_rows, rows_to_ndarray,
};
