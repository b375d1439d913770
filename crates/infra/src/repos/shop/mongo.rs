use super::IShopRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use bazaar_domain::{Shop, ID};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub struct MongoShopRepo {
    collection: Collection<Document>,
}

impl MongoShopRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("shops"),
        }
    }
}

#[async_trait::async_trait]
impl IShopRepo for MongoShopRepo {
    async fn insert(&self, shop: &Shop) -> anyhow::Result<()> {
        mongo_repo::insert::<_, ShopMongo>(&self.collection, shop).await
    }

    async fn find(&self, shop_id: &ID) -> Option<Shop> {
        let oid = shop_id.inner_ref();
        mongo_repo::find::<_, ShopMongo>(&self.collection, oid).await
    }

    async fn find_by_account(&self, account_id: &ID) -> Option<Shop> {
        let filter = doc! {
            "account_id": account_id.inner_ref()
        };
        mongo_repo::find_one_by::<_, ShopMongo>(&self.collection, filter).await
    }

    async fn delete(&self, shop_id: &ID) -> Option<Shop> {
        let oid = shop_id.inner_ref();
        mongo_repo::delete::<_, ShopMongo>(&self.collection, oid).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ShopMongo {
    pub _id: ObjectId,
    pub account_id: ObjectId,
    pub name: String,
}

impl MongoDocument<Shop> for ShopMongo {
    fn to_domain(self) -> Shop {
        Shop {
            id: ID::from(self._id),
            account_id: ID::from(self.account_id),
            name: self.name,
        }
    }

    fn from_domain(shop: &Shop) -> Self {
        Self {
            _id: shop.id.inner_ref().clone(),
            account_id: shop.account_id.inner_ref().clone(),
            name: shop.name.clone(),
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! {
            "_id": &self._id
        }
    }
}
