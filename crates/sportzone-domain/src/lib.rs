//! Domain types shared across SportZone crates.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod cart;
pub mod id;
pub mod order;
pub mod product;
pub mod user;
