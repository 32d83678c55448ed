//! Room guest configuration module

mod room;
mod session;
mod set;
mod summary;


pub use room::*;
pub use session::*;
pub use set::*;
pub use summary::*;
