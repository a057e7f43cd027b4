pub mod error;
pub mod extractor;
pub mod prober;
pub mod recorder;
pub mod target;
pub mod utils;
