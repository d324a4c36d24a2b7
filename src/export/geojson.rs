use anyhow::{Context, Result};
use serde_json::json;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::BoundarySnapshot;

/// Write a validated boundary as a GeoJSON Feature
///
/// The polygon ring is closed by repeating the first vertex, and
/// coordinates follow the GeoJSON [lon, lat] axis order. The store name
/// and center travel in the feature's properties.
///
/// # Arguments
/// * `path` - Output file path
/// * `snapshot` - Validated boundary from `validate_and_save`
pub fn write_geojson(path: &Path, snapshot: &BoundarySnapshot) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let mut ring: Vec<[f64; 2]> = snapshot
        .vertices
        .iter()
        .map(|v| [v.lon, v.lat])
        .collect();
    ring.push(ring[0]);

    let feature = json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [ring],
        },
        "properties": {
            "name": snapshot.store_name,
            "center": [snapshot.center.lon, snapshot.center.lat],
        },
    });

    serde_json::to_writer_pretty(&mut writer, &feature)
        .with_context(|| format!("Failed to write GeoJSON to {}", path.display()))?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use crate::session::BoundarySession;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_write_geojson() {
        let center = Coordinate::new(51.5, -0.10).unwrap();
        let mut session = BoundarySession::new(center, 5000.0, "Borough Market");
        for (lat, lon) in [
            (51.48, -0.10),
            (51.49, -0.07),
            (51.52, -0.08),
            (51.52, -0.12),
            (51.49, -0.13),
        ] {
            session.attempt_add_vertex(Coordinate::new(lat, lon).unwrap());
        }
        let snapshot = session.validate_and_save().unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("boundary.geojson");
        write_geojson(&path, &snapshot).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();

        assert_eq!(parsed["type"], "Feature");
        assert_eq!(parsed["geometry"]["type"], "Polygon");
        assert_eq!(parsed["properties"]["name"], "Borough Market");

        // Ring must be closed: 5 vertices plus the repeated first one
        let ring = parsed["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 6);
        assert_eq!(ring[0], ring[5]);
    }
}
