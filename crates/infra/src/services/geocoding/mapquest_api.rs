use super::{GeocodedAddress, IGeocoder};
use reqwest::Client;
use serde::Deserialize;
use tracing::error;

// https://developer.mapquest.com/documentation/geocoding-api/address/get/
const API_URL: &str = "https://www.mapquestapi.com/geocoding/v1/address";

pub struct MapQuestGeocoder {
    client: Client,
    api_key: String,
}

impl MapQuestGeocoder {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    locations: Vec<GeocodeLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeocodeLocation {
    lat_lng: LatLng,
    street: Option<String>,
    /// City
    admin_area5: Option<String>,
    /// State code
    admin_area3: Option<String>,
    /// Country code
    admin_area1: Option<String>,
    postal_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GeocodeLocation {
    fn into_geocoded(self) -> GeocodedAddress {
        let formatted_address = match (self.street.as_deref(), self.admin_area5.as_deref()) {
            (Some(street), Some(city)) => Some(format!("{}, {}", street, city)),
            (Some(street), None) => Some(street.to_string()),
            _ => None,
        };

        GeocodedAddress {
            longitude: self.lat_lng.lng,
            latitude: self.lat_lng.lat,
            formatted_address,
            street: self.street,
            city: self.admin_area5,
            state_code: self.admin_area3,
            zipcode: self.postal_code,
            country_code: self.admin_area1,
        }
    }
}

#[async_trait::async_trait]
impl IGeocoder for MapQuestGeocoder {
    async fn geocode(&self, address: &str) -> anyhow::Result<Vec<GeocodedAddress>> {
        let res = self
            .client
            .get(API_URL)
            .query(&[("key", self.api_key.as_str()), ("location", address)])
            .send()
            .await?
            .error_for_status()?;

        let res: GeocodeResponse = res.json().await.map_err(|e| {
            error!("Unexpected geocoding api response: {:?}", e);
            e
        })?;

        Ok(res
            .results
            .into_iter()
            .flat_map(|result| result.locations)
            .map(GeocodeLocation::into_geocoded)
            .collect())
    }
}
