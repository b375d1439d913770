mod login;
mod request_password_reset;
mod reset_password;

use actix_web::web;
use login::login_controller;
use request_password_reset::request_password_reset_controller;
use reset_password::reset_password_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/login", web::post().to(login_controller));
    cfg.route(
        "/auth/password-reset",
        web::post().to(request_password_reset_controller),
    );
    cfg.route(
        "/auth/password-reset",
        web::put().to(reset_password_controller),
    );
}
