//! HTTP inbound adapter exposing the booking REST API.

pub mod admin;
pub mod admin_auth;
pub mod dto;
pub mod error;
pub mod reservations;
pub mod resources;
pub mod state;
pub mod status;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::domain::Error;

/// Register the `/api` routes and request body/query error handlers.
///
/// Callers supply `web::Data<HttpState>`; probes under `/health` are
/// mounted separately because they carry their own state.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(
            web::scope("/api")
                .service(status::status)
                .service(resources::list_resources)
                .service(reservations::list_public_reservations)
                .service(reservations::create_reservation)
                .service(reservations::availability)
                .service(
                    web::scope("/admin")
                        .service(admin::admin_list_reservations)
                        .service(admin::purge_reservations)
                        .service(admin::delete_reservation)
                        .service(resources::admin_list_resources)
                        .service(resources::create_resource)
                        .service(resources::delete_resource)
                        .service(admin::get_settings)
                        .service(admin::update_settings),
                ),
        );
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("route not found").with_details(json!({ "code": "not_found" })))
}
