//! Forward-geocoding client for the terminal map search
//!
//! Talks to a Mapbox-style places API: `GET {base}/{query}.json` with a
//! country bias and access token, answering GeoJSON-ish features whose
//! `center` is `[longitude, latitude]`.
//!
//! Brazilian CEPs get a progressively looser lookup chain: registered
//! terminals first, then the bare digits as a postcode, then the dashed
//! form, then the five-digit prefix as a regional approximation. Free text
//! goes straight to the provider.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;

use signcast_common::config::GeocodingConfig;
use signcast_common::geo::{format_cep, is_cep_query, normalize_cep};
use signcast_common::types::Coordinates;
use signcast_common::{Error, Result};

/// Default timeout for geocoding requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimum interval between provider requests
const RATE_LIMIT_INTERVAL: Duration = Duration::from_millis(100);

/// User-Agent header sent to the provider
const USER_AGENT: &str = "Signcast-UI/0.1.0 (fleet dashboard)";

/// A resolved location
///
/// `approximate` is set when only the five-digit CEP prefix matched, so the
/// UI can announce a regional approximation instead of an exact point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeocodeResolution {
    pub longitude: f64,
    pub latitude: f64,
    pub approximate: bool,
}

impl GeocodeResolution {
    fn exact(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            approximate: false,
        }
    }

    fn approximate(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            approximate: true,
        }
    }
}

/// Provider response shape (only the fields we read)
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    /// `[longitude, latitude]`
    center: [f64; 2],
}

/// Geocoding client
///
/// Wraps reqwest with the configured base URL, access token and country
/// bias, and spaces provider requests at least [`RATE_LIMIT_INTERVAL`]
/// apart.
pub struct GeocodeClient {
    http_client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
    country: String,
    /// Rate limiter (last request time)
    rate_limiter: Mutex<Option<Instant>>,
}

impl GeocodeClient {
    /// Create a client from the `[geocoding]` config section
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            country: config.country.clone(),
            rate_limiter: Mutex::new(None),
        })
    }

    /// Whether an access token is configured
    ///
    /// Without one the lookup endpoint reports the service as unavailable
    /// rather than sending unauthenticated requests to the provider.
    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Resolve a location query to coordinates
    ///
    /// `local_match` short-circuits CEP queries: a registered terminal with
    /// the same normalized CEP and known coordinates wins over any provider
    /// lookup.
    pub async fn resolve(
        &self,
        query: &str,
        local_match: Option<Coordinates>,
    ) -> Result<GeocodeResolution> {
        if is_cep_query(query) {
            if let Some(coords) = local_match {
                debug!(query = %query, "Geocode resolved from registered terminal");
                return Ok(GeocodeResolution::exact(coords.longitude, coords.latitude));
            }

            let digits = normalize_cep(query);
            if let Some((lon, lat)) = self.fetch_center(&digits, "&types=postcode").await? {
                return Ok(GeocodeResolution::exact(lon, lat));
            }

            let dashed = format_cep(&digits);
            if let Some((lon, lat)) = self.fetch_center(&dashed, "&types=postcode").await? {
                return Ok(GeocodeResolution::exact(lon, lat));
            }

            // Last resort: the prefix names the broader postal region
            let prefix = &digits[..5];
            if let Some((lon, lat)) = self.fetch_center(prefix, "").await? {
                debug!(query = %query, prefix = %prefix, "Geocode fell back to CEP prefix");
                return Ok(GeocodeResolution::approximate(lon, lat));
            }
        } else if let Some((lon, lat)) = self.fetch_center(query, "").await? {
            return Ok(GeocodeResolution::exact(lon, lat));
        }

        Err(Error::NotFound(format!("no location found for '{}'", query)))
    }

    /// Enforce the minimum interval between provider requests
    async fn wait_rate_limit(&self) {
        let mut last_request = self.rate_limiter.lock().await;

        if let Some(last_time) = *last_request {
            let elapsed = last_time.elapsed();
            if elapsed < RATE_LIMIT_INTERVAL {
                sleep(RATE_LIMIT_INTERVAL - elapsed).await;
            }
        }

        *last_request = Some(Instant::now());
    }

    fn lookup_url(&self, query: &str, extra: &str) -> String {
        let mut url = format!("{}/{}.json?country={}", self.base_url, query, self.country);
        if let Some(token) = &self.access_token {
            url.push_str("&access_token=");
            url.push_str(token);
        }
        url.push_str(extra);
        url
    }

    /// One provider lookup, answering the first feature's center if any
    async fn fetch_center(&self, query: &str, extra: &str) -> Result<Option<(f64, f64)>> {
        self.wait_rate_limit().await;

        let url = self.lookup_url(query, extra);
        debug!(query = %query, "Querying geocoding provider");

        let response = self.http_client.get(&url).send().await?;
        let response = response.error_for_status()?;
        let body: GeocodeResponse = response.json().await?;

        Ok(body
            .features
            .first()
            .map(|feature| (feature.center[0], feature.center[1])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(token: Option<&str>) -> GeocodeClient {
        let config = GeocodingConfig {
            base_url: "https://api.mapbox.com/geocoding/v5/mapbox.places".to_string(),
            access_token: token.map(String::from),
            country: "br".to_string(),
        };
        GeocodeClient::new(&config).unwrap()
    }

    #[test]
    fn test_lookup_url_with_token() {
        let c = client(Some("pk.test-token"));
        assert_eq!(
            c.lookup_url("80010000", "&types=postcode"),
            "https://api.mapbox.com/geocoding/v5/mapbox.places/80010000.json\
             ?country=br&access_token=pk.test-token&types=postcode"
        );
    }

    #[test]
    fn test_lookup_url_without_token() {
        let c = client(None);
        assert_eq!(
            c.lookup_url("Batel", ""),
            "https://api.mapbox.com/geocoding/v5/mapbox.places/Batel.json?country=br"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = GeocodingConfig {
            base_url: "https://geo.example/places/".to_string(),
            access_token: None,
            country: "br".to_string(),
        };
        let c = GeocodeClient::new(&config).unwrap();
        assert_eq!(
            c.lookup_url("01010", ""),
            "https://geo.example/places/01010.json?country=br"
        );
    }

    #[test]
    fn test_response_parsing_reads_first_center() {
        let body = r#"{"features":[{"center":[-49.2733,-25.4284]},{"center":[0.0,0.0]}]}"#;
        let parsed: GeocodeResponse = serde_json::from_str(body).unwrap();
        let first = parsed.features.first().unwrap();
        assert_eq!(first.center, [-49.2733, -25.4284]);
    }

    #[test]
    fn test_response_parsing_tolerates_missing_features() {
        let parsed: GeocodeResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.features.is_empty());
    }

    #[tokio::test]
    async fn test_cep_query_prefers_registered_terminal() {
        // No token configured, so any provider request would fail; the local
        // match must short-circuit before networking.
        let c = client(None);
        let resolved = c
            .resolve(
                "80020-310",
                Some(Coordinates {
                    latitude: -25.4284,
                    longitude: -49.2733,
                }),
            )
            .await
            .unwrap();
        assert_eq!(resolved.longitude, -49.2733);
        assert_eq!(resolved.latitude, -25.4284);
        assert!(!resolved.approximate);
    }
}
