mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::Repos;
pub use services::{GeocodedAddress, IGeocoder, InMemoryGeocoder, MapQuestGeocoder};
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct BazaarContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub geocoder: Arc<dyn IGeocoder>,
}

impl BazaarContext {
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            geocoder: Arc::new(InMemoryGeocoder::default()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> BazaarContext {
    let config = Config::new();
    let repos = Repos::create_mongodb(
        &get_env_var("MONGODB_CONNECTION_STRING"),
        &get_env_var("MONGODB_NAME"),
    )
    .await
    .expect("Mongodb credentials must be set and valid");
    let api_key = config
        .geocoder_api_key
        .clone()
        .unwrap_or_else(|| panic!("MAPQUEST_API_KEY env var to be present."));

    BazaarContext {
        repos,
        config,
        sys: Arc::new(RealSys {}),
        geocoder: Arc::new(MapQuestGeocoder::new(api_key)),
    }
}

fn get_env_var(var: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| panic!("{} env var to be present.", var))
}
