//! Implementation of the `#[derive(Model)]` macro.
//!
//! Generates the `Model` impl of a record type and its field name constants.

mod attrs;
mod derive;

pub use derive::model_derive_impl;
