//! Structured readers for the loosely formatted text artifacts a
//! molecular-dynamics solver leaves behind: per-timestep trajectory dumps,
//! run logs with embedded scalar variables, time-averaged property tables,
//! and segmented profile / radial-distribution files.
//!
//! Each decoder owns its [`source::LineSource`], performs a single forward
//! pass, and memoizes its typed output; downstream calculators consume the
//! resulting [`table::DataTable`] records.

pub mod domain;
pub mod plan;
pub mod readers;
pub mod source;
pub mod table;

pub use domain::{LmpError, LmpErrorCategory, LmpResult};
pub use source::LineSource;
