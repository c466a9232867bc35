mod builder;
mod patch;
mod volume;

pub use builder::MappingBuilder;
pub use patch::{TransfiniteMapping, BOUNDARY_COUNT};
pub use volume::{TransfiniteVolume, FACE_COUNT};

use crate::error::{MappingError, Result};

/// Rejects spatial dimensions other than 2 and 3.
fn check_dimension<const D: usize>() -> Result<()> {
    if D == 2 || D == 3 {
        Ok(())
    } else {
        Err(MappingError::UnsupportedDimension(D).into())
    }
}
