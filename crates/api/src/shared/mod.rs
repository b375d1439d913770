pub mod auth;
pub mod commit;
pub mod usecase;
