pub mod errors;

pub use errors::{LmpError, LmpErrorCategory, LmpResult};
