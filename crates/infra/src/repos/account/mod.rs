mod inmemory;
mod mongo;

use bazaar_domain::{Account, ID};
pub use inmemory::InMemoryAccountRepo;
pub use mongo::MongoAccountRepo;

#[async_trait::async_trait]
pub trait IAccountRepo: Send + Sync {
    async fn insert(&self, account: &Account) -> anyhow::Result<()>;
    async fn save(&self, account: &Account) -> anyhow::Result<()>;
    async fn find(&self, account_id: &ID) -> Option<Account>;
    async fn find_by_email(&self, email: &str) -> Option<Account>;
    /// Lookup by the stored (hashed) reset token, never the plaintext.
    async fn find_by_reset_token(&self, hashed_token: &str) -> Option<Account>;
    async fn delete(&self, account_id: &ID) -> Option<Account>;
}
