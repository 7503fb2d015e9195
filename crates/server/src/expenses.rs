//! Expense API endpoints

use api_types::{
    RecordCreated,
    expense::{ExpenseNew, ExpenseView, ExpensesResponse},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn map_expense(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        category: expense.category,
        note: expense.note,
        amount: expense.amount,
        created_at: expense.created_at,
    }
}

pub async fn list(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<ExpensesResponse>, ServerError> {
    let expenses = state.engine.expenses().await?;

    Ok(Json(ExpensesResponse {
        expenses: expenses.into_iter().map(map_expense).collect(),
    }))
}

pub async fn create(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<RecordCreated>), ServerError> {
    let created_at = payload.created_at.unwrap_or_else(Utc::now);
    let id = state
        .engine
        .record_expense(
            payload.category.as_deref(),
            payload.note.as_deref(),
            payload.amount,
            created_at,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RecordCreated { success: true, id })))
}

pub async fn remove(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.remove_expense(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
