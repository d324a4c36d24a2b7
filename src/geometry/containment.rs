use crate::domain::Coordinate;

/// Ray-casting point-in-polygon test
///
/// Treats `polygon` as an implicitly closed ring (the last vertex connects
/// back to the first) and casts a horizontal ray east from `point`, counting
/// edge crossings. Odd count means inside. Handles convex and non-convex
/// simple polygons; this is true geometric containment, not a bounding-box
/// approximation.
///
/// Coordinates are treated as planar, which is sound at the few-kilometer
/// scale of a store's service area.
///
/// # Returns
/// * `false` for degenerate input (fewer than 3 vertices)
pub fn point_in_polygon(point: Coordinate, polygon: &[Coordinate]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];

        // Does edge a->b straddle the ray's latitude? The half-open
        // comparison counts each vertex on exactly one of its two edges.
        if (a.lat > point.lat) != (b.lat > point.lat) {
            let cross_lon = (b.lon - a.lon) * (point.lat - a.lat) / (b.lat - a.lat) + a.lon;
            if point.lon < cross_lon {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Contains, point, polygon};

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn square() -> Vec<Coordinate> {
        vec![
            coord(0.0, 0.0),
            coord(0.0, 10.0),
            coord(10.0, 10.0),
            coord(10.0, 0.0),
        ]
    }

    #[test]
    fn test_inside_square() {
        assert!(point_in_polygon(coord(5.0, 5.0), &square()));
    }

    #[test]
    fn test_outside_square() {
        assert!(!point_in_polygon(coord(15.0, 5.0), &square()));
        assert!(!point_in_polygon(coord(5.0, -1.0), &square()));
    }

    #[test]
    fn test_degenerate_polygon() {
        assert!(!point_in_polygon(coord(5.0, 5.0), &[]));
        assert!(!point_in_polygon(coord(5.0, 5.0), &[coord(0.0, 0.0)]));
        assert!(!point_in_polygon(
            coord(5.0, 5.0),
            &[coord(0.0, 0.0), coord(10.0, 10.0)]
        ));
    }

    #[test]
    fn test_concave_notch() {
        // U-shaped pentagon: the notch at the top center is inside the
        // bounding box but outside the polygon. A bbox shortcut would get
        // this wrong.
        let u_shape = vec![
            coord(0.0, 0.0),
            coord(0.0, 10.0),
            coord(10.0, 10.0),
            coord(1.0, 5.0),
            coord(10.0, 0.0),
        ];
        assert!(!point_in_polygon(coord(8.0, 5.0), &u_shape));
        assert!(point_in_polygon(coord(0.5, 5.0), &u_shape));
    }

    #[test]
    fn test_agrees_with_geo_contains() {
        let ring = vec![
            coord(51.49, -0.12),
            coord(51.49, -0.08),
            coord(51.51, -0.07),
            coord(51.52, -0.10),
            coord(51.51, -0.13),
        ];
        let geo_poly = polygon![
            (x: -0.12, y: 51.49),
            (x: -0.08, y: 51.49),
            (x: -0.07, y: 51.51),
            (x: -0.10, y: 51.52),
            (x: -0.13, y: 51.51),
        ];

        let probes = [
            (51.50, -0.10),
            (51.515, -0.10),
            (51.48, -0.10),
            (51.50, -0.14),
            (51.505, -0.085),
        ];
        for &(lat, lon) in &probes {
            assert_eq!(
                point_in_polygon(coord(lat, lon), &ring),
                geo_poly.contains(&point!(x: lon, y: lat)),
                "disagreement at ({lat}, {lon})"
            );
        }
    }
}
