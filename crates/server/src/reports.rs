//! Reporting API endpoints
//!
//! The report handlers wrap engine output unchanged apart from the
//! `success` envelope the clients expect.

use api_types::reports::{
    Confidence as ApiConfidence, DashboardMetricsResponse, DashboardMetricsView,
    ExpenseForecastResponse, MonthlyReportQuery, MonthlyReportResponse, OwnerShareView,
    OwnerSharesResponse,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::{ServerError, server::ServerState, user};

fn map_confidence(confidence: engine::Confidence) -> ApiConfidence {
    match confidence {
        engine::Confidence::High => ApiConfidence::High,
        engine::Confidence::Medium => ApiConfidence::Medium,
        engine::Confidence::Low => ApiConfidence::Low,
    }
}

fn map_share(share: engine::OwnerShare) -> OwnerShareView {
    OwnerShareView {
        name: share.name,
        investment_amount: share.investment_amount,
        ownership_percentage: share.ownership_percentage,
        profit_share: share.profit_share,
    }
}

/// Handle requests for the owner profit-share breakdown
pub async fn owner_shares(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<OwnerSharesResponse>, ServerError> {
    let report = state.engine.owner_share_report().await?;

    Ok(Json(OwnerSharesResponse {
        success: true,
        shares: report.shares.into_iter().map(map_share).collect(),
        total_investment: report.total_investment,
        total_profit_loss: report.total_profit_loss,
    }))
}

/// Handle requests for the next-month expense forecast
pub async fn predict_expenses(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<ExpenseForecastResponse>, ServerError> {
    let forecast = state.engine.expense_forecast().await?;

    Ok(Json(ExpenseForecastResponse {
        success: true,
        historical_data: forecast.historical,
        predicted_next_month: forecast.predicted_next_month,
        confidence: map_confidence(forecast.confidence),
    }))
}

/// Handle requests for the dashboard headline numbers
pub async fn dashboard(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<DashboardMetricsResponse>, ServerError> {
    let metrics = state.engine.dashboard_metrics().await?;

    Ok(Json(DashboardMetricsResponse {
        success: true,
        metrics: DashboardMetricsView {
            total_sales: metrics.total_sales,
            total_expenses: metrics.total_expenses,
            total_production: metrics.total_production,
            profit_loss: metrics.profit_loss,
            sales_count: metrics.sales_count as u64,
            expense_count: metrics.expense_count as u64,
            production_count: metrics.production_count as u64,
            warranty_count: metrics.warranty_count as u64,
            warranty_replaced: metrics.warranty_replaced as u64,
            warranty_pending: metrics.warranty_pending as u64,
        },
    }))
}

/// Handle requests for the per-month summary
pub async fn monthly(
    Extension(_user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<MonthlyReportQuery>,
) -> Result<Json<MonthlyReportResponse>, ServerError> {
    let report = state.engine.monthly_report(query.year, query.month).await?;

    Ok(Json(MonthlyReportResponse {
        success: true,
        month: report.month,
        total_sales: report.total_sales,
        total_production: report.total_production,
        total_expenses: report.total_expenses,
        profit_loss: report.profit_loss,
    }))
}
