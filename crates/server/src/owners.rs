//! Owner API endpoints

use api_types::{
    RecordCreated,
    owner::{OwnerNew, OwnerView, OwnersResponse},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_owner(owner: engine::Owner) -> OwnerView {
    OwnerView {
        id: owner.id,
        name: owner.name,
        email: owner.email,
        investment_amount: owner.investment_amount,
        created_at: owner.created_at,
    }
}

pub async fn list(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<OwnersResponse>, ServerError> {
    let owners = state.engine.owners().await?;

    Ok(Json(OwnersResponse {
        owners: owners.into_iter().map(map_owner).collect(),
    }))
}

pub async fn create(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<OwnerNew>,
) -> Result<(StatusCode, Json<RecordCreated>), ServerError> {
    let id = state
        .engine
        .add_owner(
            &payload.name,
            payload.email.as_deref(),
            payload.investment_amount,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RecordCreated { success: true, id })))
}

pub async fn remove(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.remove_owner(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
