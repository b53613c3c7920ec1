//! Resource ("pista") HTTP handlers.
//!
//! ```text
//! GET    /api/pistas
//! GET    /api/admin/pistas
//! POST   /api/admin/pistas
//! DELETE /api/admin/pistas/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde_json::json;

use crate::domain::ports::NewResource;
use crate::domain::{Error, ResourceId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::admin_auth::AdminAccess;
use crate::inbound::http::dto::{ResourceRequest, ResourceResponse, booking_error};
use crate::inbound::http::state::HttpState;

async fn resource_list(state: &HttpState) -> ApiResult<Vec<ResourceResponse>> {
    let resources = state
        .resources
        .list_resources()
        .await
        .map_err(booking_error)?;
    Ok(resources.into_iter().map(ResourceResponse::from).collect())
}

#[get("/pistas")]
pub async fn list_resources(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ResourceResponse>>> {
    Ok(web::Json(resource_list(&state).await?))
}

#[get("/pistas")]
pub async fn admin_list_resources(
    state: web::Data<HttpState>,
    _admin: AdminAccess,
) -> ApiResult<web::Json<Vec<ResourceResponse>>> {
    Ok(web::Json(resource_list(&state).await?))
}

#[post("/pistas")]
pub async fn create_resource(
    state: web::Data<HttpState>,
    _admin: AdminAccess,
    payload: web::Json<ResourceRequest>,
) -> ApiResult<HttpResponse> {
    let ResourceRequest {
        nombre,
        descripcion,
    } = payload.into_inner();
    let resource = state
        .resources
        .create_resource(NewResource {
            name: nombre,
            description: descripcion,
        })
        .await
        .map_err(booking_error)?;
    Ok(HttpResponse::Created().json(ResourceResponse::from(resource)))
}

/// Delete a resource and every reservation on it.
#[delete("/pistas/{id}")]
pub async fn delete_resource(
    state: web::Data<HttpState>,
    _admin: AdminAccess,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = ResourceId::from(path.into_inner());
    if state
        .resources
        .delete_resource(&id)
        .await
        .map_err(booking_error)?
    {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found("resource not found")
            .with_details(json!({ "code": "not_found", "id": id.as_str() })))
    }
}
