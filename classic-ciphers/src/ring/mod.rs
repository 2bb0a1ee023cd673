//! # Ring Module
//!
//! Provides the [`Ring`] struct for arithmetic in Z_m together with the matrix
//! operations and the exact (cofactor based) modular matrix inverse used by the
//! Hill cipher.

pub mod inverse;
pub mod math;
pub mod matrix_ops;

/// Represents a mathematical vector using a `Vec<i64>`.
pub type Vector = Vec<i64>;
/// Represents a mathematical matrix using a `Vec<Vec<i64>>`.
pub type Matrix = Vec<Vec<i64>>;

pub use inverse::{adjoint, determinant, inverse};
pub use math::Ring;
pub use num_integer::gcd;
