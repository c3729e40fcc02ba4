//! SeaORM entities for the shop database.

pub mod order_lines;
pub mod orders;
pub mod payments;
pub mod products;
pub mod users;
