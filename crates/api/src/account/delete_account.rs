use crate::error::BazaarError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use bazaar_api_structs::delete_account::APIResponse;
use bazaar_domain::{Account, Role};
use bazaar_infra::BazaarContext;

pub async fn delete_account_controller(
    http_req: HttpRequest,
    ctx: web::Data<BazaarContext>,
) -> Result<HttpResponse, BazaarError> {
    let account = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteAccountUseCase { account };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(&res.account)))
        .map_err(BazaarError::from)
}

#[derive(Debug)]
pub struct DeleteAccountUseCase {
    pub account: Account,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub account: Account,
}

#[derive(Debug)]
pub enum UseCaseError {
    /// A seller account must have a shop to cascade delete. Finding none
    /// means the relationship is broken and the deletion is refused.
    SellerWithoutShop,
    StorageError,
}

impl From<UseCaseError> for BazaarError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::SellerWithoutShop => Self::Conflict(
                "The seller account has no shop to cascade delete. Nothing was deleted.".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteAccountUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteAccount";

    async fn execute(&mut self, ctx: &BazaarContext) -> Result<Self::Response, Self::Error> {
        // Buyers have no dependent records, only sellers trigger the
        // shop lookup and cascade.
        if self.account.role == Role::Seller {
            let shop = ctx
                .repos
                .shops
                .find_by_account(&self.account.id)
                .await
                .ok_or(UseCaseError::SellerWithoutShop)?;
            ctx.repos
                .shops
                .delete(&shop.id)
                .await
                .ok_or(UseCaseError::StorageError)?;
        }

        let account = ctx
            .repos
            .accounts
            .delete(&self.account.id)
            .await
            .ok_or(UseCaseError::StorageError)?;

        Ok(UseCaseRes { account })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::account::create_account::CreateAccountUseCase;
    use bazaar_domain::Shop;

    async fn registered_account(ctx: &BazaarContext, email: &str, role: Role) -> Account {
        let usecase = CreateAccountUseCase {
            name: "A".into(),
            email: email.into(),
            password: "secret1".into(),
            role,
            address: None,
        };
        execute(usecase, ctx).await.unwrap().account
    }

    #[actix_web::test]
    async fn deleting_a_seller_cascades_to_its_shop() {
        let ctx = BazaarContext::create_inmemory();
        let seller = registered_account(&ctx, "a@x.com", Role::Seller).await;
        let shop = Shop::new(seller.id.clone(), "A's shop".into());
        ctx.repos.shops.insert(&shop).await.unwrap();

        let usecase = DeleteAccountUseCase {
            account: seller.clone(),
        };
        assert!(execute(usecase, &ctx).await.is_ok());

        assert!(ctx.repos.accounts.find(&seller.id).await.is_none());
        assert!(ctx.repos.shops.find(&shop.id).await.is_none());
    }

    #[actix_web::test]
    async fn deleting_a_seller_without_a_shop_is_refused() {
        let ctx = BazaarContext::create_inmemory();
        let seller = registered_account(&ctx, "a@x.com", Role::Seller).await;

        let usecase = DeleteAccountUseCase {
            account: seller.clone(),
        };
        let res = execute(usecase, &ctx).await;

        assert!(matches!(res, Err(UseCaseError::SellerWithoutShop)));
        // The account itself was not deleted either
        assert!(ctx.repos.accounts.find(&seller.id).await.is_some());
    }

    #[actix_web::test]
    async fn deleting_a_buyer_never_touches_shops() {
        let ctx = BazaarContext::create_inmemory();
        let buyer = registered_account(&ctx, "b@x.com", Role::Buyer).await;
        // A buyer without a shop deletes just fine, the cascade only
        // applies to sellers.
        let usecase = DeleteAccountUseCase {
            account: buyer.clone(),
        };
        assert!(execute(usecase, &ctx).await.is_ok());
        assert!(ctx.repos.accounts.find(&buyer.id).await.is_none());
    }
}
