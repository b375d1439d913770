mod account;
mod shared;
mod shop;

pub use account::{hash_reset_token, Account, Claims, Email, Geolocation, InvalidAccountField, Role};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shop::Shop;
