pub mod auth;
pub mod bootstrap;
pub mod cascade;
pub mod catalog;
pub mod order;
pub mod user;
