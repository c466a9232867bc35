use std::fmt;

use crate::error::{MappingError, Result};
use crate::geometry::boundary::Boundary;

use super::{TransfiniteMapping, BOUNDARY_COUNT};

/// Collects the four boundaries of a [`TransfiniteMapping`] by index.
///
/// Errors are deferred to [`build`](Self::build): an out-of-range index or
/// an empty slot fails there, and no mapping is produced.
pub struct MappingBuilder<const D: usize> {
    slots: [Option<Box<dyn Boundary<D>>>; BOUNDARY_COUNT],
    bad_index: Option<usize>,
}

impl<const D: usize> MappingBuilder<D> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Default::default(),
            bad_index: None,
        }
    }

    /// Sets boundary `index` (0..4), replacing any earlier value.
    #[must_use]
    pub fn boundary(mut self, index: usize, boundary: impl Boundary<D> + 'static) -> Self {
        match self.slots.get_mut(index) {
            Some(slot) => *slot = Some(Box::new(boundary)),
            None => {
                self.bad_index.get_or_insert(index);
            }
        }
        self
    }

    /// Builds the mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if an index passed to [`boundary`](Self::boundary)
    /// was out of range, a slot was never filled, or `D` is not 2 or 3.
    pub fn build(self) -> Result<TransfiniteMapping<D>> {
        if let Some(index) = self.bad_index {
            return Err(MappingError::InvalidBoundaryIndex {
                index,
                count: BOUNDARY_COUNT,
            }
            .into());
        }
        let mut boundaries = Vec::with_capacity(BOUNDARY_COUNT);
        for (index, slot) in self.slots.into_iter().enumerate() {
            boundaries.push(slot.ok_or(MappingError::MissingBoundary(index))?);
        }
        TransfiniteMapping::new(boundaries)
    }
}

impl<const D: usize> Default for MappingBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> fmt::Debug for MappingBuilder<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled: Vec<bool> = self.slots.iter().map(Option::is_some).collect();
        f.debug_struct("MappingBuilder")
            .field("filled", &filled)
            .field("bad_index", &self.bad_index)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::TransfiniteError;
    use crate::geometry::boundary::Segment;
    use crate::math::Vector2;

    fn seg(a: (f64, f64), b: (f64, f64)) -> Segment<2> {
        Segment::new(Vector2::new(a.0, a.1), Vector2::new(b.0, b.1)).unwrap()
    }

    #[test]
    fn builds_in_any_order() {
        let m = MappingBuilder::new()
            .boundary(3, seg((0.0, 0.0), (0.0, 1.0)))
            .boundary(1, seg((1.0, 0.0), (1.0, 1.0)))
            .boundary(2, seg((0.0, 1.0), (1.0, 1.0)))
            .boundary(0, seg((0.0, 0.0), (1.0, 0.0)))
            .build()
            .unwrap();
        assert_eq!(m.corners()[2], Vector2::new(1.0, 1.0));
    }

    #[test]
    fn later_boundary_replaces_earlier() {
        let m = MappingBuilder::new()
            .boundary(0, seg((5.0, 5.0), (6.0, 5.0)))
            .boundary(0, seg((0.0, 0.0), (1.0, 0.0)))
            .boundary(1, seg((1.0, 0.0), (1.0, 1.0)))
            .boundary(2, seg((0.0, 1.0), (1.0, 1.0)))
            .boundary(3, seg((0.0, 0.0), (0.0, 1.0)))
            .build()
            .unwrap();
        assert_eq!(m.corners()[0], Vector2::new(0.0, 0.0));
    }

    #[test]
    fn missing_slot() {
        let r = MappingBuilder::new()
            .boundary(0, seg((0.0, 0.0), (1.0, 0.0)))
            .boundary(1, seg((1.0, 0.0), (1.0, 1.0)))
            .boundary(3, seg((0.0, 0.0), (0.0, 1.0)))
            .build();
        assert!(matches!(
            r,
            Err(TransfiniteError::Mapping(MappingError::MissingBoundary(2)))
        ));
    }

    #[test]
    fn index_out_of_range() {
        let r = MappingBuilder::new()
            .boundary(4, seg((0.0, 0.0), (1.0, 0.0)))
            .build();
        assert!(matches!(
            r,
            Err(TransfiniteError::Mapping(MappingError::InvalidBoundaryIndex {
                index: 4,
                count: 4
            }))
        ));
    }
}
