pub mod error;
pub mod geometry;
pub mod mapping;
pub mod math;
pub mod sampling;

pub use error::{Result, TransfiniteError};
pub use mapping::{MappingBuilder, TransfiniteMapping, TransfiniteVolume};
