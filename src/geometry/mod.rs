pub mod containment;
pub mod distance;

pub use containment::point_in_polygon;
pub use distance::haversine_distance;
