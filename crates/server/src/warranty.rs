//! Warranty API endpoints

use api_types::{
    RecordCreated,
    warranty::{WarrantyNew, WarrantyResponse, WarrantyUpdate, WarrantyView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_claim(claim: engine::WarrantyClaim) -> WarrantyView {
    WarrantyView {
        id: claim.id,
        customer: claim.customer,
        product: claim.product,
        replaced: claim.replaced,
        created_at: claim.created_at,
    }
}

pub async fn list(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<WarrantyResponse>, ServerError> {
    let claims = state.engine.warranty_claims().await?;

    Ok(Json(WarrantyResponse {
        claims: claims.into_iter().map(map_claim).collect(),
    }))
}

pub async fn create(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<WarrantyNew>,
) -> Result<(StatusCode, Json<RecordCreated>), ServerError> {
    let id = state
        .engine
        .open_warranty_claim(payload.customer.as_deref(), payload.product.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(RecordCreated { success: true, id })))
}

pub async fn update(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<WarrantyUpdate>,
) -> Result<StatusCode, ServerError> {
    state.engine.set_warranty_replaced(id, payload.replaced).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.remove_warranty_claim(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
