use serde::Serialize;

use super::Coordinate;

/// The immutable result of a successful boundary validation
///
/// Exactly five vertices in insertion order, with the center guaranteed to
/// lie inside the polygon they form. Only `BoundarySession::validate_and_save`
/// produces one; from there it is ready to hand to a persistence sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundarySnapshot {
    pub center: Coordinate,
    pub vertices: [Coordinate; 5],
    pub store_name: String,
}

impl BoundarySnapshot {
    pub(crate) fn new(center: Coordinate, vertices: [Coordinate; 5], store_name: String) -> Self {
        Self {
            center,
            vertices,
            store_name,
        }
    }
}
