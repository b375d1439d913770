mod account;
mod shared;
mod shop;

pub use account::{IAccountRepo, InMemoryAccountRepo, MongoAccountRepo};
use mongodb::{bson::doc, options::ClientOptions, Client};
pub use shop::{IShopRepo, InMemoryShopRepo, MongoShopRepo};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub accounts: Arc<dyn IAccountRepo>,
    pub shops: Arc<dyn IShopRepo>,
}

impl Repos {
    pub async fn create_mongodb(connection_string: &str, db_name: &str) -> anyhow::Result<Self> {
        let client_options = ClientOptions::parse(connection_string).await?;
        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Makes sure the db is reachable before the server starts accepting
        // requests, and that the indexes backing email uniqueness and geo
        // queries exist.
        info!("DB CHECKING CONNECTION ...");
        db.run_command(
            doc! {
                "createIndexes": "users",
                "indexes": [
                    {
                        "key": { "email": 1 },
                        "name": "unique_email",
                        "unique": true
                    },
                    {
                        "key": { "geolocation.coordinates": "2dsphere" },
                        "name": "geolocation_2dsphere"
                    }
                ]
            },
            None,
        )
        .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            accounts: Arc::new(MongoAccountRepo::new(&db)),
            shops: Arc::new(MongoShopRepo::new(&db)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            accounts: Arc::new(InMemoryAccountRepo::new()),
            shops: Arc::new(InMemoryShopRepo::new()),
        }
    }
}
