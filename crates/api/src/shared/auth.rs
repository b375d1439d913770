use crate::error::BazaarError;
use actix_web::HttpRequest;
use bazaar_domain::{Account, Claims, ID};
use bazaar_infra::BazaarContext;
use jsonwebtoken::{decode, DecodingKey, Validation};

fn parse_authtoken_header(token_header_value: &str) -> String {
    let mut token = token_header_value.replace("Bearer", "");
    token = token.replace("bearer", "");
    String::from(token.trim())
}

/// Resolves the `Account` behind the request's bearer token or rejects the
/// request.
pub async fn protect_route(
    req: &HttpRequest,
    ctx: &BazaarContext,
) -> Result<Account, BazaarError> {
    let token = match req
        .headers()
        .get("authorization")
        .and_then(|header| header.to_str().ok())
    {
        Some(header) => parse_authtoken_header(header),
        None => {
            return Err(BazaarError::Unauthorized(
                "Missing authorization header".into(),
            ))
        }
    };

    let token_data = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(ctx.config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| BazaarError::Unauthorized("Invalid bearer token".into()))?;

    let account_id = token_data
        .claims
        .account_id
        .parse::<ID>()
        .map_err(|_| BazaarError::Unauthorized("Invalid bearer token".into()))?;

    ctx.repos
        .accounts
        .find(&account_id)
        .await
        .ok_or_else(|| BazaarError::Unauthorized("Invalid bearer token".into()))
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;
    use bazaar_domain::{Email, Entity, Role};

    #[test]
    fn it_parses_the_bearer_scheme() {
        assert_eq!(parse_authtoken_header("Bearer abc.def.ghi"), "abc.def.ghi");
        assert_eq!(parse_authtoken_header("bearer abc.def.ghi"), "abc.def.ghi");
        assert_eq!(parse_authtoken_header("abc.def.ghi"), "abc.def.ghi");
    }

    async fn insert_account(ctx: &BazaarContext) -> Account {
        let mut account = Account::new(Email::new("a@x.com").unwrap(), Role::Buyer, 0);
        account.name = "A".into();
        ctx.repos.accounts.insert(&account).await.unwrap();
        account
    }

    fn request_with_token(token: &str) -> HttpRequest {
        TestRequest::default()
            .insert_header(("authorization", format!("Bearer {}", token)))
            .to_http_request()
    }

    #[actix_web::test]
    async fn it_resolves_the_account_behind_a_valid_token() {
        let ctx = BazaarContext::create_inmemory();
        let account = insert_account(&ctx).await;
        let token = account
            .sign_bearer_token(
                &ctx.config.jwt_secret,
                ctx.config.jwt_expires_in,
                ctx.sys.get_timestamp_millis(),
            )
            .unwrap();

        let req = request_with_token(&token);
        let res = protect_route(&req, &ctx).await.unwrap();
        assert!(res.eq(&account));
    }

    #[actix_web::test]
    async fn it_rejects_a_token_signed_with_another_secret() {
        let ctx = BazaarContext::create_inmemory();
        let account = insert_account(&ctx).await;
        let token = account
            .sign_bearer_token(
                "not-the-configured-secret",
                ctx.config.jwt_expires_in,
                ctx.sys.get_timestamp_millis(),
            )
            .unwrap();

        let req = request_with_token(&token);
        let res = protect_route(&req, &ctx).await;
        assert!(matches!(res, Err(BazaarError::Unauthorized(_))));
    }

    #[actix_web::test]
    async fn it_rejects_a_request_without_an_authorization_header() {
        let ctx = BazaarContext::create_inmemory();
        insert_account(&ctx).await;

        let req = TestRequest::default().to_http_request();
        let res = protect_route(&req, &ctx).await;
        assert!(matches!(res, Err(BazaarError::Unauthorized(_))));
    }

    #[actix_web::test]
    async fn it_rejects_a_token_for_a_deleted_account() {
        let ctx = BazaarContext::create_inmemory();
        let account = insert_account(&ctx).await;
        let token = account
            .sign_bearer_token(
                &ctx.config.jwt_secret,
                ctx.config.jwt_expires_in,
                ctx.sys.get_timestamp_millis(),
            )
            .unwrap();
        ctx.repos.accounts.delete(&account.id).await.unwrap();

        let req = request_with_token(&token);
        let res = protect_route(&req, &ctx).await;
        assert!(matches!(res, Err(BazaarError::Unauthorized(_))));
    }
}
