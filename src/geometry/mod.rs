pub mod boundary;
pub mod surface;

pub use boundary::{Boundary, BoundaryFn, CircularArc, FnBoundary, NurbsCurve, Segment};
pub use surface::{BilinearPatch, BoundarySurface, FnSurface};
