//! Wishlist record normalization

mod item;

pub use item::*;
