//! Stay dates, apply/confirm payloads and search query decoding

mod dates;
mod query;
mod request;


pub use dates::*;
pub use query::*;
pub use request::*;
