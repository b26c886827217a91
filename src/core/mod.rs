pub mod file_manager;
pub mod reservoir;
pub mod rng;
pub mod sampler;

pub use file_manager::{FileInfo, InputFile};
pub use reservoir::{OffsetReservoir, GROWTH_INCREMENT};
pub use rng::MersenneTwister;
pub use sampler::{Backend, RecordSource, SampleReport, MAX_LINE_HINT};
