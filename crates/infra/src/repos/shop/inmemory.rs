use super::IShopRepo;
use crate::repos::shared::inmemory_repo::*;
use bazaar_domain::{Shop, ID};

pub struct InMemoryShopRepo {
    shops: std::sync::Mutex<Vec<Shop>>,
}

impl InMemoryShopRepo {
    pub fn new() -> Self {
        Self {
            shops: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IShopRepo for InMemoryShopRepo {
    async fn insert(&self, shop: &Shop) -> anyhow::Result<()> {
        insert(shop, &self.shops);
        Ok(())
    }

    async fn find(&self, shop_id: &ID) -> Option<Shop> {
        find(shop_id, &self.shops)
    }

    async fn find_by_account(&self, account_id: &ID) -> Option<Shop> {
        let shops = find_by(&self.shops, |shop| shop.account_id == *account_id);
        shops.into_iter().next()
    }

    async fn delete(&self, shop_id: &ID) -> Option<Shop> {
        delete(shop_id, &self.shops)
    }
}
