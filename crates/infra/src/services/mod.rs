mod geocoding;

pub use geocoding::{GeocodedAddress, IGeocoder, InMemoryGeocoder, MapQuestGeocoder};
