use super::IAccountRepo;
use crate::repos::shared::inmemory_repo::*;
use bazaar_domain::{Account, ID};

pub struct InMemoryAccountRepo {
    accounts: std::sync::Mutex<Vec<Account>>,
}

impl InMemoryAccountRepo {
    pub fn new() -> Self {
        Self {
            accounts: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAccountRepo for InMemoryAccountRepo {
    async fn insert(&self, account: &Account) -> anyhow::Result<()> {
        insert(account, &self.accounts);
        Ok(())
    }

    async fn save(&self, account: &Account) -> anyhow::Result<()> {
        save(account, &self.accounts);
        Ok(())
    }

    async fn find(&self, account_id: &ID) -> Option<Account> {
        find(account_id, &self.accounts)
    }

    async fn find_by_email(&self, email: &str) -> Option<Account> {
        let accounts = find_by(&self.accounts, |account| account.email.as_str() == email);
        accounts.into_iter().next()
    }

    async fn find_by_reset_token(&self, hashed_token: &str) -> Option<Account> {
        let accounts = find_by(&self.accounts, |account| {
            account.password_reset_token.as_deref() == Some(hashed_token)
        });
        accounts.into_iter().next()
    }

    async fn delete(&self, account_id: &ID) -> Option<Account> {
        delete(account_id, &self.accounts)
    }
}
