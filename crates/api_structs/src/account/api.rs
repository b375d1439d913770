use crate::dtos::AccountDTO;
use bazaar_domain::{Account, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub account: AccountDTO,
}

impl AccountResponse {
    pub fn new(account: &Account) -> Self {
        Self {
            account: AccountDTO::new(account),
        }
    }
}

pub mod create_account {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub email: String,
        pub password: String,
        #[serde(default)]
        pub role: Role,
        #[serde(default)]
        pub address: Option<String>,
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

pub mod get_account {
    use super::*;

    pub type APIResponse = AccountResponse;
}

pub mod update_account {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub password: Option<String>,
        #[serde(default)]
        pub address: Option<String>,
    }

    pub type APIResponse = AccountResponse;
}

pub mod delete_account {
    use super::*;

    pub type APIResponse = AccountResponse;
}
