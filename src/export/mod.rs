pub mod geojson;

pub use geojson::write_geojson;
