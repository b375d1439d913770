use crate::dtos::AccountDTO;
use bazaar_domain::Account;
use serde::{Deserialize, Serialize};

pub mod login {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub account: AccountDTO,
        pub token: String,
    }

    impl APIResponse {
        pub fn new(account: &Account, token: String) -> Self {
            Self {
                account: AccountDTO::new(account),
                token,
            }
        }
    }
}

pub mod request_password_reset {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: String,
    }

    /// The plaintext token is returned to the caller exactly once; only its
    /// hash is stored. Delivering it to the user (e.g. by email) is the
    /// caller's job.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reset_token: String,
    }
}

pub mod reset_password {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub token: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub account: AccountDTO,
        pub token: String,
    }

    impl APIResponse {
        pub fn new(account: &Account, token: String) -> Self {
            Self {
                account: AccountDTO::new(account),
                token,
            }
        }
    }
}
