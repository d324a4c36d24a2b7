use thiserror::Error;

use crate::domain::{BoundarySnapshot, Coordinate};
use crate::geometry::{haversine_distance, point_in_polygon};

/// Number of vertices a complete boundary has (also the hard cap)
pub const MAX_VERTICES: usize = 5;

/// Outcome of a vertex insertion attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Point appended to the boundary
    Accepted,
    /// Boundary already has the maximum of 5 points; undo one to make room
    RejectedTooMany,
    /// Point is farther from the center than the configured service radius
    RejectedOutOfRadius,
}

/// Why a save attempt was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("boundary has {have} of 5 required points")]
    IncompleteBoundary { have: usize },
    #[error("store location falls outside the drawn boundary")]
    CenterNotContained,
}

/// Construction phase, derived from the vertex count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Building,
    Ready,
}

/// Interactive boundary-construction session for one store
///
/// Holds the store center, the service radius, and the ordered vertex
/// sequence, and enforces every boundary invariant: at most five vertices,
/// each accepted only within the radius measured at insertion time, and a
/// save only when the five-vertex polygon actually encloses the center.
///
/// The radius gates acquisition, not retroactive validity: shrinking the
/// radius or moving the center never drops vertices already accepted.
///
/// Every operation returns a discriminated result; nothing in here panics,
/// logs, or performs I/O. A successful save leaves the session live so the
/// operator can keep editing.
#[derive(Debug, Clone)]
pub struct BoundarySession {
    center: Coordinate,
    radius_m: f64,
    vertices: Vec<Coordinate>,
    store_name: String,
}

impl BoundarySession {
    /// Create a session with no vertices yet
    ///
    /// # Arguments
    /// * `center` - store location
    /// * `radius_m` - service radius in meters, must be positive
    /// * `store_name` - descriptive label carried into the snapshot
    pub fn new(center: Coordinate, radius_m: f64, store_name: impl Into<String>) -> Self {
        Self {
            center,
            radius_m,
            vertices: Vec::new(),
            store_name: store_name.into(),
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    pub fn phase(&self) -> Phase {
        match self.vertices.len() {
            0 => Phase::Empty,
            n if n < MAX_VERTICES => Phase::Building,
            _ => Phase::Ready,
        }
    }

    /// Try to append a boundary vertex
    ///
    /// The cap is checked before the radius, so a sixth click is reported
    /// as `RejectedTooMany` no matter how close it is. The radius check
    /// uses the center and radius as they are right now.
    pub fn attempt_add_vertex(&mut self, point: Coordinate) -> AddOutcome {
        if self.vertices.len() >= MAX_VERTICES {
            return AddOutcome::RejectedTooMany;
        }
        if haversine_distance(point, self.center) > self.radius_m {
            return AddOutcome::RejectedOutOfRadius;
        }
        self.vertices.push(point);
        AddOutcome::Accepted
    }

    /// Remove the most recently added vertex
    ///
    /// # Returns
    /// * `false` if there was nothing to remove
    pub fn remove_last_vertex(&mut self) -> bool {
        self.vertices.pop().is_some()
    }

    /// Drop all vertices; center, radius and name are untouched
    pub fn clear_all(&mut self) {
        self.vertices.clear();
    }

    /// Move the store center; existing vertices are not re-validated
    pub fn set_center(&mut self, center: Coordinate) {
        self.center = center;
    }

    /// Change the service radius
    ///
    /// Only finite, positive values are accepted. Existing vertices are
    /// not re-validated; the radius governs future insertions only.
    ///
    /// # Returns
    /// * `false` (state unchanged) for zero, negative, or non-finite input
    pub fn set_radius(&mut self, radius_m: f64) -> bool {
        if radius_m.is_finite() && radius_m > 0.0 {
            self.radius_m = radius_m;
            true
        } else {
            false
        }
    }

    pub fn set_store_name(&mut self, name: impl Into<String>) {
        self.store_name = name.into();
    }

    /// Validate the boundary and emit an immutable snapshot
    ///
    /// Requires exactly five vertices whose polygon (closed, in insertion
    /// order) contains the center. The session itself is left unchanged, so
    /// the operator can keep editing and save again.
    pub fn validate_and_save(&self) -> Result<BoundarySnapshot, SaveError> {
        let ring: [Coordinate; MAX_VERTICES] = self
            .vertices
            .as_slice()
            .try_into()
            .map_err(|_| SaveError::IncompleteBoundary {
                have: self.vertices.len(),
            })?;

        if !point_in_polygon(self.center, &self.vertices) {
            return Err(SaveError::CenterNotContained);
        }

        Ok(BoundarySnapshot::new(
            self.center,
            ring,
            self.store_name.clone(),
        ))
    }
}
