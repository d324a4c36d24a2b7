use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::thread;
use std::time::Duration;

use crate::domain::Coordinate;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = "storefence/0.1.0 (https://github.com/shantanugoel/storefence)";

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
}

/// Geocode a free-form store address to a coordinate.
///
/// Uses the Nominatim API to resolve the address to the store's location,
/// which seeds the session center exactly like a manual center edit.
/// Includes a 1 second delay for rate limiting (Nominatim ToS).
///
/// # Arguments
/// * `address` - Free-form address (e.g., "221B Baker Street, London")
///
/// # Returns
/// * `Ok(Coordinate)` - The geocoded store location
/// * `Err` - If the address was not found or the API errored
pub fn geocode_address(address: &str) -> Result<Coordinate> {
    // Rate limiting - Nominatim requires max 1 request per second
    thread::sleep(Duration::from_secs(1));

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(NOMINATIM_URL)
        .query(&[
            ("q", address),
            ("format", "json"),
            ("limit", "1"),
        ])
        .send()
        .context("Failed to send request to Nominatim API")?;

    if !response.status().is_success() {
        bail!("Nominatim API returned error status: {}", response.status());
    }

    let results: Vec<NominatimResult> = response
        .json()
        .context("Failed to parse Nominatim JSON response")?;

    let result = results
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("Address not found: {}", address))?;

    let lat: f64 = result
        .lat
        .parse()
        .context("Failed to parse latitude from Nominatim response")?;
    let lon: f64 = result
        .lon
        .parse()
        .context("Failed to parse longitude from Nominatim response")?;

    Coordinate::new(lat, lon).ok_or_else(|| {
        anyhow::anyhow!(
            "Nominatim returned out-of-range coordinates for {}: ({}, {})",
            result.display_name,
            lat,
            lon
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nominatim_response() {
        // Sample response from Nominatim
        let json = r#"[{"lat":"51.5237038","lon":"-0.1585531","display_name":"Baker Street, London, England"}]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(json).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].lat, "51.5237038");
        assert_eq!(results[0].lon, "-0.1585531");
    }
}
