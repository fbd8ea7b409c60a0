//! Implementation of the `#[derive(Filter)]` macro.
//!
//! Generates the `Filter` impl of a filter struct: the ordered field table
//! built from `#[filter(...)]` annotations and the value accessor.

mod attrs;
mod derive;

pub use derive::filter_derive_impl;
