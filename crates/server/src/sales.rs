//! Sales API endpoints

use api_types::{
    RecordCreated,
    sale::{SaleNew, SaleView, SalesResponse},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_sale(sale: engine::Sale) -> SaleView {
    SaleView {
        id: sale.id,
        customer: sale.customer,
        total_amount: sale.total_amount,
        date: sale.date,
        created_at: sale.created_at,
    }
}

pub async fn list(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<SalesResponse>, ServerError> {
    let sales = state.engine.sales().await?;

    Ok(Json(SalesResponse {
        sales: sales.into_iter().map(map_sale).collect(),
    }))
}

pub async fn create(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<SaleNew>,
) -> Result<(StatusCode, Json<RecordCreated>), ServerError> {
    let date = payload.date.unwrap_or_else(Utc::now);
    let id = state
        .engine
        .record_sale(payload.customer.as_deref(), payload.total_amount, date)
        .await?;

    Ok((StatusCode::CREATED, Json(RecordCreated { success: true, id })))
}

pub async fn remove(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.remove_sale(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
