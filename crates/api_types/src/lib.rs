//! Wire types shared by the server and its clients.
//!
//! Payload field names are camelCase on the wire, matching the store
//! documents the previous system exposed. Report responses carry a
//! `success` flag; failures are rendered by the server as
//! `{"success": false, "error": "..."}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Acknowledgement for a newly created record.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordCreated {
    pub success: bool,
    pub id: Uuid,
}

pub mod owner {
    use super::*;

    /// Request body for registering an owner.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OwnerNew {
        pub name: String,
        pub email: Option<String>,
        /// Must be >= 0 when present; absent counts as zero in reports.
        pub investment_amount: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OwnerView {
        pub id: Uuid,
        pub name: String,
        pub email: Option<String>,
        pub investment_amount: Option<f64>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OwnersResponse {
        pub owners: Vec<OwnerView>,
    }
}

pub mod sale {
    use super::*;

    /// Request body for recording a sale.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SaleNew {
        pub customer: Option<String>,
        pub total_amount: Option<f64>,
        /// Instant the sale refers to. Absent: server uses now().
        pub date: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SaleView {
        pub id: Uuid,
        pub customer: Option<String>,
        pub total_amount: Option<f64>,
        pub date: DateTime<Utc>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalesResponse {
        pub sales: Vec<SaleView>,
    }
}

pub mod production {
    use super::*;

    /// Request body for recording a production batch.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductionNew {
        pub product: Option<String>,
        pub units: Option<i32>,
        pub total_cost: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductionView {
        pub id: Uuid,
        pub product: Option<String>,
        pub units: Option<i32>,
        pub total_cost: Option<f64>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductionResponse {
        pub batches: Vec<ProductionView>,
    }
}

pub mod expense {
    use super::*;

    /// Request body for recording an expense.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseNew {
        pub category: Option<String>,
        pub note: Option<String>,
        pub amount: Option<f64>,
        /// Decides the forecast month bucket. Absent: server uses now().
        pub created_at: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        pub id: Uuid,
        pub category: Option<String>,
        pub note: Option<String>,
        pub amount: Option<f64>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpensesResponse {
        pub expenses: Vec<ExpenseView>,
    }
}

pub mod warranty {
    use super::*;

    /// Request body for opening a warranty claim.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct WarrantyNew {
        pub customer: Option<String>,
        pub product: Option<String>,
    }

    /// Request body for flipping the replaced flag.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct WarrantyUpdate {
        pub replaced: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WarrantyView {
        pub id: Uuid,
        pub customer: Option<String>,
        pub product: Option<String>,
        pub replaced: bool,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WarrantyResponse {
        pub claims: Vec<WarrantyView>,
    }
}

pub mod reports {
    use std::collections::BTreeMap;

    use super::*;

    /// Forecast quality band.
    ///
    /// Serialized as exactly `High` / `Medium` / `Low`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum Confidence {
        High,
        Medium,
        Low,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OwnerShareView {
        pub name: String,
        pub investment_amount: f64,
        /// Two-decimal string, e.g. `"33.33"`.
        pub ownership_percentage: String,
        /// Two-decimal string; negative on a loss.
        pub profit_share: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OwnerSharesResponse {
        pub success: bool,
        pub shares: Vec<OwnerShareView>,
        pub total_investment: f64,
        pub total_profit_loss: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseForecastResponse {
        pub success: bool,
        /// `"YYYY-MM"` -> summed monthly expense, oldest first.
        pub historical_data: BTreeMap<String, f64>,
        pub predicted_next_month: f64,
        pub confidence: Confidence,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DashboardMetricsView {
        pub total_sales: f64,
        pub total_expenses: f64,
        pub total_production: f64,
        pub profit_loss: f64,
        pub sales_count: u64,
        pub expense_count: u64,
        pub production_count: u64,
        pub warranty_count: u64,
        pub warranty_replaced: u64,
        pub warranty_pending: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardMetricsResponse {
        pub success: bool,
        pub metrics: DashboardMetricsView,
    }

    /// Query string for the monthly report.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthlyReportQuery {
        pub year: i32,
        pub month: u32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MonthlyReportResponse {
        pub success: bool,
        pub month: String,
        pub total_sales: f64,
        pub total_production: f64,
        pub total_expenses: f64,
        pub profit_loss: f64,
    }
}
