pub mod coordinate;
pub mod snapshot;

pub use coordinate::Coordinate;
pub use snapshot::BoundarySnapshot;
