use actix_web::{web, HttpResponse};
use bazaar_api_structs::check_status::*;

async fn status_controller() -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Yo! We are up!\r\n".into(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status_controller));
}
