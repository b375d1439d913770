use crate::error::BazaarError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use bazaar_api_structs::request_password_reset::{APIResponse, RequestBody};
use bazaar_infra::BazaarContext;

pub async fn request_password_reset_controller(
    ctx: web::Data<BazaarContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, BazaarError> {
    let usecase = RequestPasswordResetUseCase {
        email: body.0.email,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                reset_token: res.reset_token,
            })
        })
        .map_err(BazaarError::from)
}

#[derive(Debug)]
pub struct RequestPasswordResetUseCase {
    pub email: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    /// Plaintext reset token. Handed to the caller exactly once and never
    /// persisted.
    pub reset_token: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    AccountNotFound(String),
    StorageError,
}

impl From<UseCaseError> for BazaarError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::AccountNotFound(email) => {
                Self::NotFound(format!("An account with email: {}, was not found.", email))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RequestPasswordResetUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "RequestPasswordReset";

    async fn execute(&mut self, ctx: &BazaarContext) -> Result<Self::Response, Self::Error> {
        let email = self.email.trim().to_lowercase();
        let mut account = ctx
            .repos
            .accounts
            .find_by_email(&email)
            .await
            .ok_or(UseCaseError::AccountNotFound(email))?;

        let reset_token = account.generate_reset_token(ctx.sys.get_timestamp_millis());

        ctx.repos
            .accounts
            .save(&account)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { reset_token })
    }
}
