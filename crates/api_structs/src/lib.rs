mod account;
mod auth;
mod status;

pub mod dtos {
    pub use crate::account::dtos::*;
}

pub use crate::account::api::*;
pub use crate::auth::api::*;
pub use crate::status::api::*;
