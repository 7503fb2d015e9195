use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;
use serde::Serialize;

pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod expenses;
mod owners;
mod production;
mod reports;
mod sales;
mod server;
mod user;
mod warranty;

pub mod types {
    pub mod owner {
        pub use api_types::owner::{OwnerNew, OwnerView, OwnersResponse};
    }

    pub mod sale {
        pub use api_types::sale::{SaleNew, SaleView, SalesResponse};
    }

    pub mod production {
        pub use api_types::production::{ProductionNew, ProductionResponse, ProductionView};
    }

    pub mod expense {
        pub use api_types::expense::{ExpenseNew, ExpenseView, ExpensesResponse};
    }

    pub mod warranty {
        pub use api_types::warranty::{WarrantyNew, WarrantyResponse, WarrantyUpdate, WarrantyView};
    }

    pub mod reports {
        pub use api_types::reports::{
            Confidence, DashboardMetricsResponse, ExpenseForecastResponse, MonthlyReportQuery,
            MonthlyReportResponse, OwnerSharesResponse,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

/// Failure envelope: every error leaves the server as
/// `{"success": false, "error": "..."}`.
#[derive(Serialize)]
struct Error {
    success: bool,
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidAmount(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (
            status,
            Json(Error {
                success: false,
                error,
            }),
        )
            .into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
