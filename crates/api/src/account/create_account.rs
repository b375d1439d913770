use crate::error::BazaarError;
use crate::shared::commit::{apply_changes, AccountChanges, CommitError};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use bazaar_api_structs::create_account::{APIResponse, RequestBody};
use bazaar_domain::{Account, Email, Role};
use bazaar_infra::BazaarContext;

pub async fn create_account_controller(
    ctx: web::Data<BazaarContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, BazaarError> {
    let body = body.0;
    let usecase = CreateAccountUseCase {
        name: body.name,
        email: body.email,
        password: body.password,
        role: body.role,
        address: body.address,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(&res.account, res.token)))
        .map_err(BazaarError::from)
}

#[derive(Debug)]
pub struct CreateAccountUseCase {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub address: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub account: Account,
    pub token: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidEmail(String),
    EmailTaken(String),
    Commit(CommitError),
    StorageError,
}

impl From<UseCaseError> for BazaarError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("{} is not a valid email address", email))
            }
            UseCaseError::EmailTaken(email) => Self::Conflict(format!(
                "An account with the email {} already exists. Emails need to be unique.",
                email
            )),
            UseCaseError::Commit(e) => e.into(),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateAccountUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateAccount";

    async fn execute(&mut self, ctx: &BazaarContext) -> Result<Self::Response, Self::Error> {
        let email =
            Email::new(&self.email).map_err(|_| UseCaseError::InvalidEmail(self.email.clone()))?;
        if let Some(_existing) = ctx.repos.accounts.find_by_email(email.as_str()).await {
            return Err(UseCaseError::EmailTaken(email.as_str().to_string()));
        }

        let mut account = Account::new(email, self.role, ctx.sys.get_timestamp_millis());
        let changes = AccountChanges {
            name: Some(self.name.clone()),
            password: Some(self.password.clone()),
            address: self.address.clone(),
        };
        apply_changes(&mut account, changes, ctx)
            .await
            .map_err(UseCaseError::Commit)?;

        // Concurrent registrations racing on the same email are resolved by
        // the store's unique index, not here.
        ctx.repos
            .accounts
            .insert(&account)
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
