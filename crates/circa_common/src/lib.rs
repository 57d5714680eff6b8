//! Shared foundational helpers used across the Circa HDL generator.
//!
//! This crate provides identifier sanitising for user-supplied labels and
//! content hashing of generated module text.

#![warn(missing_docs)]

pub mod hash;
pub mod label;

pub use hash::ContentHash;
pub use label::correct_label;
