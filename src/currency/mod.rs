//! Display-currency conversion module

mod converter;
mod hotel;

pub use converter::*;
pub use hotel::*;
