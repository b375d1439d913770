use crate::error::BazaarError;
use crate::shared::auth::protect_route;
use actix_web::{web, HttpRequest, HttpResponse};
use bazaar_api_structs::get_account::APIResponse;
use bazaar_infra::BazaarContext;

pub async fn get_account_controller(
    http_req: HttpRequest,
    ctx: web::Data<BazaarContext>,
) -> Result<HttpResponse, BazaarError> {
    let account = protect_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(&account)))
}
