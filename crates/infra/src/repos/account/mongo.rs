use super::IAccountRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use bazaar_domain::{Account, Email, Geolocation, Role, ID};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use tracing::error;

pub struct MongoAccountRepo {
    collection: Collection<Document>,
}

impl MongoAccountRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }
}

#[async_trait::async_trait]
impl IAccountRepo for MongoAccountRepo {
    async fn insert(&self, account: &Account) -> anyhow::Result<()> {
        mongo_repo::insert::<_, AccountMongo>(&self.collection, account).await
    }

    async fn save(&self, account: &Account) -> anyhow::Result<()> {
        mongo_repo::save::<_, AccountMongo>(&self.collection, account).await
    }

    async fn find(&self, account_id: &ID) -> Option<Account> {
        let oid = account_id.inner_ref();
        mongo_repo::find::<_, AccountMongo>(&self.collection, oid).await
    }

    async fn find_by_email(&self, email: &str) -> Option<Account> {
        let filter = doc! {
            "email": email
        };
        mongo_repo::find_one_by::<_, AccountMongo>(&self.collection, filter).await
    }

    async fn find_by_reset_token(&self, hashed_token: &str) -> Option<Account> {
        let filter = doc! {
            "password_reset_token": hashed_token
        };
        mongo_repo::find_one_by::<_, AccountMongo>(&self.collection, filter).await
    }

    async fn delete(&self, account_id: &ID) -> Option<Account> {
        let oid = account_id.inner_ref();
        mongo_repo::delete::<_, AccountMongo>(&self.collection, oid).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AccountMongo {
    pub _id: ObjectId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
    pub address: Option<String>,
    pub geolocation: Option<GeolocationMongo>,
    pub password_reset_token: Option<String>,
    pub password_reset_expires: Option<i64>,
    pub created_at: i64,
}

/// GeoJSON point layout expected by the 2dsphere index.
#[derive(Debug, Serialize, Deserialize)]
struct GeolocationMongo {
    pub r#type: String,
    pub coordinates: Vec<f64>,
    pub formatted_address: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
}

impl MongoDocument<Account> for AccountMongo {
    fn to_domain(self) -> Account {
        let oid = self._id;
        // A point that is not exactly [lon, lat] is corrupt and must not be
        // turned into some fabricated coordinate.
        let geolocation = self.geolocation.and_then(|geo| match geo.coordinates.as_slice() {
            [lon, lat] => Some(Geolocation {
                coordinates: [*lon, *lat],
                formatted_address: geo.formatted_address,
                street: geo.street,
                city: geo.city,
                state: geo.state,
                zipcode: geo.zipcode,
                country: geo.country,
            }),
            malformed => {
                error!(
                    "Dropping malformed geolocation coordinates {:?} on account: {}",
                    malformed, oid
                );
                None
            }
        });

        Account {
            id: ID::from(self._id),
            name: self.name,
            email: Email::unchecked(self.email),
            role: self.role,
            password: self.password,
            address: self.address,
            geolocation,
            password_reset_token: self.password_reset_token,
            password_reset_expires: self.password_reset_expires,
            created_at: self.created_at,
        }
    }

    fn from_domain(account: &Account) -> Self {
        let geolocation = account.geolocation.as_ref().map(|geo| GeolocationMongo {
            r#type: "Point".to_string(),
            coordinates: geo.coordinates.to_vec(),
            formatted_address: geo.formatted_address.clone(),
            street: geo.street.clone(),
            city: geo.city.clone(),
            state: geo.state.clone(),
            zipcode: geo.zipcode.clone(),
            country: geo.country.clone(),
        });

        Self {
            _id: account.id.inner_ref().clone(),
            name: account.name.clone(),
            email: account.email.as_str().to_string(),
            role: account.role,
            password: account.password.clone(),
            address: account.address.clone(),
            geolocation,
            password_reset_token: account.password_reset_token.clone(),
            password_reset_expires: account.password_reset_expires,
            created_at: account.created_at,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! {
            "_id": &self._id
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn account_doc(coordinates: Vec<f64>) -> AccountMongo {
        AccountMongo {
            _id: ObjectId::new(),
            name: "A".into(),
            email: "a@x.com".into(),
            role: Role::Buyer,
            password: String::new(),
            address: Some("Karl Johans gate 1".into()),
            geolocation: Some(GeolocationMongo {
                r#type: "Point".to_string(),
                coordinates,
                formatted_address: None,
                street: None,
                city: None,
                state: None,
                zipcode: None,
                country: None,
            }),
            password_reset_token: None,
            password_reset_expires: None,
            created_at: 0,
        }
    }

    #[test]
    fn it_restores_a_two_element_point() {
        let account = account_doc(vec![10.7461, 59.9127]).to_domain();
        let geolocation = account.geolocation.unwrap();
        assert_eq!(geolocation.coordinates, [10.7461, 59.9127]);
    }

    #[test]
    fn malformed_coordinates_are_dropped_not_coerced() {
        for coordinates in [vec![], vec![10.7461], vec![10.7461, 59.9127, 42.0]] {
            let account = account_doc(coordinates).to_domain();
            assert!(account.geolocation.is_none());
        }
    }
}
