pub use entity::{categories, products, Id};

pub mod category;
pub mod error;
pub mod product;
