mod mapquest_api;

pub use mapquest_api::MapQuestGeocoder;

/// One match for a free-text address lookup, best match first in the
/// result list.
#[derive(Debug, Clone, Default)]
pub struct GeocodedAddress {
    pub longitude: f64,
    pub latitude: f64,
    pub formatted_address: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub zipcode: Option<String>,
    pub country_code: Option<String>,
}

#[async_trait::async_trait]
pub trait IGeocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> anyhow::Result<Vec<GeocodedAddress>>;
}

/// Geocoder used when not running against the real service.
pub struct InMemoryGeocoder {
    pub results: Vec<GeocodedAddress>,
    pub fail: bool,
}

impl InMemoryGeocoder {
    pub fn failing() -> Self {
        Self {
            results: Vec::new(),
            fail: true,
        }
    }
}

impl Default for InMemoryGeocoder {
    fn default() -> Self {
        Self {
            results: vec![GeocodedAddress {
                longitude: 10.7461,
                latitude: 59.9127,
                formatted_address: Some("Karl Johans gate 1, Oslo".into()),
                street: Some("Karl Johans gate 1".into()),
                city: Some("Oslo".into()),
                state_code: Some("03".into()),
                zipcode: Some("0154".into()),
                country_code: Some("NO".into()),
            }],
            fail: false,
        }
    }
}

#[async_trait::async_trait]
impl IGeocoder for InMemoryGeocoder {
    async fn geocode(&self, _address: &str) -> anyhow::Result<Vec<GeocodedAddress>> {
        if self.fail {
            return Err(anyhow::anyhow!("Geocoding service unavailable"));
        }
        Ok(self.results.clone())
    }
}
