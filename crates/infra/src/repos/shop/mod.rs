mod inmemory;
mod mongo;

use bazaar_domain::{Shop, ID};
pub use inmemory::InMemoryShopRepo;
pub use mongo::MongoShopRepo;

#[async_trait::async_trait]
pub trait IShopRepo: Send + Sync {
    async fn insert(&self, shop: &Shop) -> anyhow::Result<()>;
    async fn find(&self, shop_id: &ID) -> Option<Shop>;
    /// The shop owned by the given seller account, if any. An account owns
    /// at most one shop.
    async fn find_by_account(&self, account_id: &ID) -> Option<Shop>;
    async fn delete(&self, shop_id: &ID) -> Option<Shop>;
}

#[cfg(test)]
mod tests {
    use crate::BazaarContext;
    use bazaar_domain::{Entity, Shop, ID};

    #[tokio::test]
    async fn create_find_and_delete() {
        let ctx = BazaarContext::create_inmemory();
        let owner = ID::new();
        let shop = Shop::new(owner.clone(), "A's shop".into());

        assert!(ctx.repos.shops.insert(&shop).await.is_ok());

        let res = ctx.repos.shops.find(&shop.id).await.unwrap();
        assert!(res.eq(&shop));
        let res = ctx.repos.shops.find_by_account(&owner).await.unwrap();
        assert!(res.eq(&shop));
        assert!(ctx.repos.shops.find_by_account(&ID::new()).await.is_none());

        let res = ctx.repos.shops.delete(&shop.id).await;
        assert!(res.is_some());
        assert!(ctx.repos.shops.find(&shop.id).await.is_none());
    }
}
