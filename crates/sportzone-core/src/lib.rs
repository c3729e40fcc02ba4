//! Web plumbing shared by SportZone services.

pub mod envelope;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
