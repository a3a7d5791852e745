//! Request handlers for the catalog API.

pub mod bulk;
pub mod catalog;
pub mod products;
pub mod tree;
