pub mod log;
pub mod printprop;
pub mod profile;
pub mod timeavg;
pub mod trajectory;

pub use log::LogReader;
pub use printprop::PrintPropReader;
pub use profile::{ProfileBlock, ProfileReader};
pub use timeavg::{TIMEAVG_PREAMBLE_LINES, TimeAvgReader};
pub use trajectory::{TrajectoryReader, TrajectorySnapshot};
