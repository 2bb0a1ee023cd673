//! Immutable lookup tables: the DES permutation/substitution tables and the Hill cipher alphabet.

pub mod alphabet;
pub mod des_tables;
