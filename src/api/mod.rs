pub mod nominatim;

pub use nominatim::geocode_address;
