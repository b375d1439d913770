use crate::error::BazaarError;
use crate::shared::auth::protect_route;
use crate::shared::commit::{apply_changes, AccountChanges, CommitError};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use bazaar_api_structs::update_account::{APIResponse, RequestBody};
use bazaar_domain::Account;
use bazaar_infra::BazaarContext;

pub async fn update_account_controller(
    http_req: HttpRequest,
    ctx: web::Data<BazaarContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, BazaarError> {
    let account = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateAccountUseCase {
        account,
        changes: AccountChanges {
            name: body.name,
            password: body.password,
            address: body.address,
        },
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(&res.account)))
        .map_err(BazaarError::from)
}

#[derive(Debug)]
pub struct UpdateAccountUseCase {
    pub account: Account,
    pub changes: AccountChanges,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub account: Account,
}

#[derive(Debug)]
pub enum UseCaseError {
    Commit(CommitError),
    StorageError,
}

impl From<UseCaseError> for BazaarError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Commit(e) => e.into(),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateAccountUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateAccount";

    async fn execute(&mut self, ctx: &BazaarContext) -> Result<Self::Response, Self::Error> {
        let mut account = self.account.clone();
        let changes = std::mem::take(&mut self.changes);

        apply_changes(&mut account, changes, ctx)
            .await
            .map_err(UseCaseError::Commit)?;

        ctx.repos
            .accounts
            .save(&account)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { account })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::account::create_account::CreateAccountUseCase;
    use bazaar_domain::Role;
    use bazaar_infra::InMemoryGeocoder;
    use std::sync::Arc;

    async fn registered_account(ctx: &BazaarContext) -> Account {
        let usecase = CreateAccountUseCase {
            name: "A".into(),
            email: "a@x.com".into(),
            password: "secret1".into(),
            role: Role::Buyer,
            address: None,
        };
        execute(usecase, ctx).await.unwrap().account
    }

    #[actix_web::test]
    async fn changed_address_populates_geolocation_subfields() {
        let ctx = BazaarContext::create_inmemory();
        let account = registered_account(&ctx).await;

        let usecase = UpdateAccountUseCase {
            account,
            changes: AccountChanges {
                address: Some("Karl Johans gate 1".into()),
                ..Default::default()
            },
        };
        let res = execute(usecase, &ctx).await.unwrap();

        let stored = ctx.repos.accounts.find(&res.account.id).await.unwrap();
        assert_eq!(stored.address.as_deref(), Some("Karl Johans gate 1"));
        let geolocation = stored.geolocation.unwrap();
        assert_eq!(geolocation.coordinates, [10.7461, 59.9127]);
        assert_eq!(geolocation.street.as_deref(), Some("Karl Johans gate 1"));
        assert_eq!(geolocation.city.as_deref(), Some("Oslo"));
        assert_eq!(geolocation.state.as_deref(), Some("03"));
        assert_eq!(geolocation.zipcode.as_deref(), Some("0154"));
        assert_eq!(geolocation.country.as_deref(), Some("NO"));
    }

    #[actix_web::test]
    async fn save_without_address_change_leaves_geolocation_untouched() {
        let ctx = BazaarContext::create_inmemory();
        let account = registered_account(&ctx).await;

        let usecase = UpdateAccountUseCase {
            account: account.clone(),
            changes: AccountChanges {
                address: Some("Karl Johans gate 1".into()),
                ..Default::default()
            },
        };
        let account = execute(usecase, &ctx).await.unwrap().account;
        let geolocation_before = account.geolocation.clone();

        let usecase = UpdateAccountUseCase {
            account,
            changes: AccountChanges {
                name: Some("B".into()),
                ..Default::default()
            },
        };
        let res = execute(usecase, &ctx).await.unwrap();

        let stored = ctx.repos.accounts.find(&res.account.id).await.unwrap();
        assert_eq!(stored.name, "B");
        assert_eq!(stored.geolocation, geolocation_before);
    }

    #[actix_web::test]
    async fn geocoding_failure_prevents_any_write() {
        let mut ctx = BazaarContext::create_inmemory();
        let account = registered_account(&ctx).await;
        ctx.geocoder = Arc::new(InMemoryGeocoder::failing());

        let usecase = UpdateAccountUseCase {
            account: account.clone(),
            changes: AccountChanges {
                name: Some("B".into()),
                address: Some("Karl Johans gate 1".into()),
                ..Default::default()
            },
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::Commit(_))));

        // No partial state was persisted
        let stored = ctx.repos.accounts.find(&account.id).await.unwrap();
        assert_eq!(stored.name, "A");
        assert!(stored.address.is_none());
        assert!(stored.geolocation.is_none());
    }

    #[actix_web::test]
    async fn changed_password_is_rehashed() {
        let ctx = BazaarContext::create_inmemory();
        let account = registered_account(&ctx).await;

        let usecase = UpdateAccountUseCase {
            account,
            changes: AccountChanges {
                password: Some("secret2".into()),
                ..Default::default()
            },
        };
        let res = execute(usecase, &ctx).await.unwrap();

        let stored = ctx.repos.accounts.find(&res.account.id).await.unwrap();
        assert_ne!(stored.password, "secret2");
        assert!(stored.verify_password("secret2"));
        assert!(!stored.verify_password("secret1"));
    }
}
