mod create_account;
mod delete_account;
mod get_account;
mod update_account;

use actix_web::web;
use create_account::create_account_controller;
use delete_account::delete_account_controller;
use get_account::get_account_controller;
use update_account::update_account_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/account", web::post().to(create_account_controller));
    cfg.route("/account", web::get().to(get_account_controller));
    cfg.route("/account", web::put().to(update_account_controller));
    cfg.route("/account", web::delete().to(delete_account_controller));
}
