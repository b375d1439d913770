use crate::error::BazaarError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use bazaar_api_structs::login::{APIResponse, RequestBody};
use bazaar_domain::Account;
use bazaar_infra::BazaarContext;

pub async fn login_controller(
    ctx: web::Data<BazaarContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, BazaarError> {
    let body = body.0;
    let usecase = LoginUseCase {
        email: body.email,
        password: body.password,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(&res.account, res.token)))
        .map_err(BazaarError::from)
}

#[derive(Debug)]
pub struct LoginUseCase {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub account: Account,
    pub token: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    /// Unknown email and wrong password answer the same so the endpoint
    /// cannot be used to probe which emails are registered.
    InvalidCredentials,
    StorageError,
}

impl From<UseCaseError> for BazaarError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCredentials => {
                Self::Unauthorized("Invalid email or password".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for LoginUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "Login";

    async fn execute(&mut self, ctx: &BazaarContext) -> Result<Self::Response, Self::Error> {
        let email = self.email.trim().to_lowercase();
        let account = ctx
            .repos
            .accounts
            .find_by_email(&email)
            .await
            .ok_or(UseCaseError::InvalidCredentials)?;

        if !account.verify_password(&self.password) {
            return Err(UseCaseError::InvalidCredentials);
        }

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
