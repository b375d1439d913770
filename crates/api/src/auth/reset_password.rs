use crate::error::BazaarError;
use crate::shared::commit::{apply_changes, AccountChanges, CommitError};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use bazaar_api_structs::reset_password::{APIResponse, RequestBody};
use bazaar_domain::{hash_reset_token, Account};
use bazaar_infra::BazaarContext;

pub async fn reset_password_controller(
    ctx: web::Data<BazaarContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, BazaarError> {
    let body = body.0;
    let usecase = ResetPasswordUseCase {
        token: body.token,
        password: body.password,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(&res.account, res.token)))
        .map_err(BazaarError::from)
}

#[derive(Debug)]
pub struct ResetPasswordUseCase {
    pub token: String,
    pub password: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub account: Account,
    pub token: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidToken,
    Commit(CommitError),
    StorageError,
}

impl From<UseCaseError> for BazaarError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidToken => {
                Self::BadClientData("Reset token is invalid or has expired".into())
            }
            UseCaseError::Commit(e) => e.into(),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ResetPasswordUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "ResetPassword";

    async fn execute(&mut self, ctx: &BazaarContext) -> Result<Self::Response, Self::Error> {
        let hashed_token = hash_reset_token(&self.token);
        let mut account = ctx
            .repos
            .accounts
            .find_by_reset_token(&hashed_token)
            .await
            .ok_or(UseCaseError::InvalidToken)?;

        if !account.reset_token_matches(&self.token, ctx.sys.get_timestamp_millis()) {
            return Err(UseCaseError::InvalidToken);
        }

        let changes = AccountChanges {
            password: Some(std::mem::take(&mut self.password)),
            ..Default::default()
        };
        apply_changes(&mut account, changes, ctx)
            .await
            .map_err(UseCaseError::Commit)?;
        account.clear_reset_token();

        ctx.repos
            .accounts
            .save(&account)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let token = account
            .sign_bearer_token(
                &ctx.config.jwt_secret,
                ctx.config.jwt_expires_in,
                ctx.sys.get_timestamp_millis(),
            )
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { account, token })
    }
}
