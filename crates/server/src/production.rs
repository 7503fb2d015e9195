//! Production API endpoints

use api_types::{
    RecordCreated,
    production::{ProductionNew, ProductionResponse, ProductionView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_batch(batch: engine::ProductionBatch) -> ProductionView {
    ProductionView {
        id: batch.id,
        product: batch.product,
        units: batch.units,
        total_cost: batch.total_cost,
        created_at: batch.created_at,
    }
}

pub async fn list(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<ProductionResponse>, ServerError> {
    let batches = state.engine.production_batches().await?;

    Ok(Json(ProductionResponse {
        batches: batches.into_iter().map(map_batch).collect(),
    }))
}

pub async fn create(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ProductionNew>,
) -> Result<(StatusCode, Json<RecordCreated>), ServerError> {
    let id = state
        .engine
        .record_production(payload.product.as_deref(), payload.units, payload.total_cost)
        .await?;

    Ok((StatusCode::CREATED, Json(RecordCreated { success: true, id })))
}

pub async fn remove(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.remove_production(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
