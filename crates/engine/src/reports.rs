//! Aggregate reports: owner profit shares, expense forecasting, dashboard
//! metrics and per-month summaries.
//!
//! Everything in this module is pure. Callers hand in record snapshots and
//! get freshly computed values back; store access lives on
//! [`Engine`](crate::Engine). Concurrent invocations never interfere.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};

use crate::{
    expenses::Expense, money, owners::Owner, production::ProductionBatch, sales::Sale,
    warranty::WarrantyClaim,
};

/// Qualitative quality label for a forecast.
///
/// Driven purely by how many monthly buckets back the fitted line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    fn from_bucket_count(n: usize) -> Self {
        match n {
            0 | 1 => Self::Low,
            2 => Self::Medium,
            _ => Self::High,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// One owner's slice of the result (never persisted).
#[derive(Clone, Debug, PartialEq)]
pub struct OwnerShare {
    pub name: String,
    pub investment_amount: f64,
    /// Rendered with exactly two decimals, e.g. `"33.33"`.
    pub ownership_percentage: String,
    /// Rendered with exactly two decimals; negative when the business runs
    /// at a loss.
    pub profit_share: String,
}

/// Profit-share breakdown over a full snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct ShareReport {
    /// One entry per owner, in input order.
    pub shares: Vec<OwnerShare>,
    pub total_investment: f64,
    pub total_profit_loss: f64,
}

/// Next-month expense forecast.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseForecast {
    /// Summed expenses per `"YYYY-MM"` bucket, oldest first.
    pub historical: BTreeMap<String, f64>,
    /// Never negative.
    pub predicted_next_month: f64,
    pub confidence: Confidence,
}

/// Headline totals and counts for the dashboard.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardMetrics {
    pub total_sales: f64,
    pub total_expenses: f64,
    pub total_production: f64,
    pub profit_loss: f64,
    pub sales_count: usize,
    pub expense_count: usize,
    pub production_count: usize,
    pub warranty_count: usize,
    pub warranty_replaced: usize,
    pub warranty_pending: usize,
}

/// Totals restricted to a single calendar month.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyReport {
    /// The `"YYYY-MM"` bucket the totals cover.
    pub month: String,
    pub total_sales: f64,
    pub total_production: f64,
    pub total_expenses: f64,
    pub profit_loss: f64,
}

/// Calendar-month bucket key (`"YYYY-MM"`) for an instant.
///
/// Buckets are always derived in UTC; reports never honor a local timezone.
#[must_use]
pub fn month_key(instant: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", instant.year(), instant.month())
}

/// Computes the profit-share breakdown for a set of owners.
///
/// `profit_loss = total_sales - total_production - total_expenses`, split
/// across owners proportionally to their investment. With zero total
/// investment every percentage is zero, so the split never divides by zero.
#[must_use]
pub fn owner_shares(
    owners: &[Owner],
    sales: &[Sale],
    batches: &[ProductionBatch],
    expenses: &[Expense],
) -> ShareReport {
    let total_investment: f64 = owners.iter().map(Owner::investment_or_zero).sum();
    let total_sales: f64 = sales.iter().map(Sale::total_or_zero).sum();
    let total_production: f64 = batches.iter().map(ProductionBatch::cost_or_zero).sum();
    let total_expenses: f64 = expenses.iter().map(Expense::amount_or_zero).sum();
    let profit_loss = total_sales - total_production - total_expenses;

    let shares = owners
        .iter()
        .map(|owner| {
            let percentage = if total_investment > 0.0 {
                owner.investment_or_zero() / total_investment * 100.0
            } else {
                0.0
            };
            let profit_share = profit_loss * percentage / 100.0;

            OwnerShare {
                name: owner.name.clone(),
                investment_amount: owner.investment_or_zero(),
                ownership_percentage: money::format_fixed2(percentage),
                profit_share: money::format_fixed2(profit_share),
            }
        })
        .collect();

    ShareReport {
        shares,
        total_investment,
        total_profit_loss: profit_loss,
    }
}

/// Forecasts next month's expenses with an ordinary least-squares fit over
/// monthly totals.
///
/// Expenses are bucketed by the UTC calendar month of `created_at` and the
/// bucket sums become the series `y_1..y_n` with `x_i = i`. With no history
/// the prediction is zero; with a single month the value carries forward;
/// otherwise the fitted line is extrapolated to month `n + 1` and clamped at
/// zero.
#[must_use]
pub fn forecast_expenses(expenses: &[Expense]) -> ExpenseForecast {
    let mut monthly: BTreeMap<String, f64> = BTreeMap::new();
    for expense in expenses {
        *monthly.entry(month_key(expense.created_at)).or_insert(0.0) += expense.amount_or_zero();
    }

    // BTreeMap iterates keys in lexicographic order, which for "YYYY-MM"
    // strings is chronological order.
    let values: Vec<f64> = monthly.values().copied().collect();
    let n = values.len();

    let predicted = match n {
        0 => 0.0,
        1 => values[0],
        _ => {
            let nf = n as f64;
            let sum_x = nf * (nf + 1.0) / 2.0;
            let sum_x2 = nf * (nf + 1.0) * (2.0 * nf + 1.0) / 6.0;
            let sum_y: f64 = values.iter().sum();
            let sum_xy: f64 = values
                .iter()
                .enumerate()
                .map(|(i, y)| (i + 1) as f64 * y)
                .sum();

            // The x values are distinct, so the denominator is strictly
            // positive for n >= 2.
            let slope = (nf * sum_xy - sum_x * sum_y) / (nf * sum_x2 - sum_x * sum_x);
            let intercept = (sum_y - slope * sum_x) / nf;
            intercept + slope * (nf + 1.0)
        }
    };

    ExpenseForecast {
        historical: monthly,
        // Expenses cannot be forecast negative.
        predicted_next_month: predicted.max(0.0),
        confidence: Confidence::from_bucket_count(n),
    }
}

/// Computes the dashboard headline numbers over a full snapshot.
#[must_use]
pub fn dashboard_metrics(
    sales: &[Sale],
    batches: &[ProductionBatch],
    expenses: &[Expense],
    claims: &[WarrantyClaim],
) -> DashboardMetrics {
    let total_sales: f64 = sales.iter().map(Sale::total_or_zero).sum();
    let total_production: f64 = batches.iter().map(ProductionBatch::cost_or_zero).sum();
    let total_expenses: f64 = expenses.iter().map(Expense::amount_or_zero).sum();
    let warranty_replaced = claims.iter().filter(|claim| claim.replaced).count();

    DashboardMetrics {
        total_sales,
        total_expenses,
        total_production,
        profit_loss: total_sales - total_production - total_expenses,
        sales_count: sales.len(),
        expense_count: expenses.len(),
        production_count: batches.len(),
        warranty_count: claims.len(),
        warranty_replaced,
        warranty_pending: claims.len() - warranty_replaced,
    }
}

/// Computes totals for a single calendar month.
///
/// Sales are bucketed by their `date`, production batches and expenses by
/// `created_at`. The caller validates the month range.
#[must_use]
pub fn monthly_report(
    year: i32,
    month: u32,
    sales: &[Sale],
    batches: &[ProductionBatch],
    expenses: &[Expense],
) -> MonthlyReport {
    let key = format!("{year:04}-{month:02}");

    let total_sales: f64 = sales
        .iter()
        .filter(|sale| month_key(sale.date) == key)
        .map(Sale::total_or_zero)
        .sum();
    let total_production: f64 = batches
        .iter()
        .filter(|batch| month_key(batch.created_at) == key)
        .map(ProductionBatch::cost_or_zero)
        .sum();
    let total_expenses: f64 = expenses
        .iter()
        .filter(|expense| month_key(expense.created_at) == key)
        .map(Expense::amount_or_zero)
        .sum();

    MonthlyReport {
        month: key,
        total_sales,
        total_production,
        total_expenses,
        profit_loss: total_sales - total_production - total_expenses,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;

    fn instant(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    fn owner(name: &str, investment: Option<f64>) -> Owner {
        Owner {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: None,
            investment_amount: investment,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn sale(total: Option<f64>, date: &str) -> Sale {
        Sale {
            id: Uuid::new_v4(),
            customer: None,
            total_amount: total,
            date: instant(date),
            created_at: instant(date),
        }
    }

    fn batch(cost: Option<f64>, date: &str) -> ProductionBatch {
        ProductionBatch {
            id: Uuid::new_v4(),
            product: None,
            units: None,
            total_cost: cost,
            created_at: instant(date),
        }
    }

    fn expense(amount: Option<f64>, date: &str) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            category: None,
            note: None,
            amount,
            created_at: instant(date),
        }
    }

    fn claim(replaced: bool) -> WarrantyClaim {
        WarrantyClaim {
            id: Uuid::new_v4(),
            customer: None,
            product: None,
            replaced,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn shares_follow_investment_ratio() {
        let owners = [owner("Ayesha", Some(6000.0)), owner("Omar", Some(4000.0))];
        let sales = [sale(Some(10_000.0), "2026-03-01T00:00:00Z")];
        let batches = [batch(Some(3000.0), "2026-03-01T00:00:00Z")];
        let expenses = [expense(Some(2000.0), "2026-03-01T00:00:00Z")];

        let report = owner_shares(&owners, &sales, &batches, &expenses);

        assert_eq!(report.total_investment, 10_000.0);
        assert_eq!(report.total_profit_loss, 5000.0);
        assert_eq!(report.shares[0].ownership_percentage, "60.00");
        assert_eq!(report.shares[0].profit_share, "3000.00");
        assert_eq!(report.shares[1].ownership_percentage, "40.00");
        assert_eq!(report.shares[1].profit_share, "2000.00");
    }

    #[test]
    fn zero_total_investment_yields_zero_percentages() {
        let owners = [owner("Ayesha", None), owner("Omar", Some(0.0))];
        let sales = [sale(Some(500.0), "2026-03-01T00:00:00Z")];
        let expenses = [expense(Some(900.0), "2026-03-01T00:00:00Z")];

        let report = owner_shares(&owners, &sales, &[], &expenses);

        assert_eq!(report.total_investment, 0.0);
        assert_eq!(report.total_profit_loss, -400.0);
        for share in &report.shares {
            assert_eq!(share.ownership_percentage, "0.00");
            assert_eq!(share.profit_share, "0.00");
        }
    }

    #[test]
    fn no_owners_gives_empty_report() {
        let report = owner_shares(&[], &[], &[], &[]);

        assert!(report.shares.is_empty());
        assert_eq!(report.total_investment, 0.0);
        assert_eq!(report.total_profit_loss, 0.0);
    }

    #[test]
    fn missing_amounts_count_as_zero() {
        let owners = [owner("Ayesha", Some(1000.0))];
        let sales = [sale(None, "2026-03-01T00:00:00Z"), sale(Some(700.0), "2026-03-02T00:00:00Z")];
        let batches = [batch(None, "2026-03-01T00:00:00Z")];
        let expenses = [expense(None, "2026-03-01T00:00:00Z")];

        let report = owner_shares(&owners, &sales, &batches, &expenses);

        assert_eq!(report.total_profit_loss, 700.0);
        assert_eq!(report.shares[0].profit_share, "700.00");
    }

    #[test]
    fn shares_sum_back_to_profit_loss_within_rounding() {
        let owners = [
            owner("A", Some(1000.0)),
            owner("B", Some(1000.0)),
            owner("C", Some(1000.0)),
        ];
        let sales = [sale(Some(100.0), "2026-03-01T00:00:00Z")];

        let report = owner_shares(&owners, &sales, &[], &[]);

        let sum: f64 = report
            .shares
            .iter()
            .map(|share| share.profit_share.parse::<f64>().unwrap())
            .sum();
        assert!((sum - report.total_profit_loss).abs() <= 0.01 * owners.len() as f64);
    }

    #[test]
    fn owner_order_is_preserved_and_results_are_order_invariant() {
        let forward = [owner("Ayesha", Some(6000.0)), owner("Omar", Some(4000.0))];
        let backward = [owner("Omar", Some(4000.0)), owner("Ayesha", Some(6000.0))];
        let sales = [sale(Some(1000.0), "2026-03-01T00:00:00Z")];

        let a = owner_shares(&forward, &sales, &[], &[]);
        let b = owner_shares(&backward, &sales, &[], &[]);

        assert_eq!(a.shares[0].name, "Ayesha");
        assert_eq!(b.shares[0].name, "Omar");

        let mut a_sorted = a.shares.clone();
        let mut b_sorted = b.shares.clone();
        a_sorted.sort_by(|x, y| x.name.cmp(&y.name));
        b_sorted.sort_by(|x, y| x.name.cmp(&y.name));
        assert_eq!(a_sorted, b_sorted);
    }

    #[test]
    fn forecast_of_no_expenses_is_zero_with_low_confidence() {
        let forecast = forecast_expenses(&[]);

        assert!(forecast.historical.is_empty());
        assert_eq!(forecast.predicted_next_month, 0.0);
        assert_eq!(forecast.confidence, Confidence::Low);
    }

    #[test]
    fn single_month_carries_forward() {
        let forecast = forecast_expenses(&[expense(Some(500.0), "2024-01-15T00:00:00Z")]);

        assert_eq!(forecast.historical.len(), 1);
        assert_eq!(forecast.historical["2024-01"], 500.0);
        assert_eq!(forecast.predicted_next_month, 500.0);
        assert_eq!(forecast.confidence, Confidence::Low);
    }

    #[test]
    fn two_months_extrapolate_the_line() {
        let forecast = forecast_expenses(&[
            expense(Some(1000.0), "2024-01-10T00:00:00Z"),
            expense(Some(1500.0), "2024-02-10T00:00:00Z"),
        ]);

        // slope 500, intercept 500, prediction for month 3.
        assert_eq!(forecast.predicted_next_month, 2000.0);
        assert_eq!(forecast.confidence, Confidence::Medium);
    }

    #[test]
    fn three_linear_months_extend_the_line() {
        let forecast = forecast_expenses(&[
            expense(Some(100.0), "2024-01-10T00:00:00Z"),
            expense(Some(200.0), "2024-02-10T00:00:00Z"),
            expense(Some(300.0), "2024-03-10T00:00:00Z"),
        ]);

        assert_eq!(forecast.predicted_next_month, 400.0);
        assert_eq!(forecast.confidence, Confidence::High);
    }

    #[test]
    fn falling_trend_clamps_at_zero() {
        let forecast = forecast_expenses(&[
            expense(Some(1000.0), "2024-01-10T00:00:00Z"),
            expense(Some(100.0), "2024-02-10T00:00:00Z"),
        ]);

        // The fitted line extrapolates to -800 for month 3.
        assert_eq!(forecast.predicted_next_month, 0.0);
        assert_eq!(forecast.confidence, Confidence::Medium);
    }

    #[test]
    fn same_month_expenses_share_a_bucket() {
        let forecast = forecast_expenses(&[
            expense(Some(300.0), "2024-01-05T00:00:00Z"),
            expense(Some(200.0), "2024-01-20T00:00:00Z"),
        ]);

        assert_eq!(forecast.historical.len(), 1);
        assert_eq!(forecast.historical["2024-01"], 500.0);
        assert_eq!(forecast.confidence, Confidence::Low);
    }

    #[test]
    fn buckets_order_chronologically_across_years() {
        let forecast = forecast_expenses(&[
            expense(Some(200.0), "2024-01-10T00:00:00Z"),
            expense(Some(100.0), "2023-12-10T00:00:00Z"),
        ]);

        let keys: Vec<&String> = forecast.historical.keys().collect();
        assert_eq!(keys, ["2023-12", "2024-01"]);
        // y = (100, 200): slope 100, prediction for month 3.
        assert_eq!(forecast.predicted_next_month, 300.0);
    }

    #[test]
    fn month_key_is_utc_zero_padded() {
        assert_eq!(month_key(instant("2024-03-31T23:30:00Z")), "2024-03");
        assert_eq!(month_key(instant("0987-07-01T00:00:00Z")), "0987-07");
    }

    #[test]
    fn dashboard_splits_warranty_claims() {
        let sales = [sale(Some(100.0), "2026-03-01T00:00:00Z")];
        let batches = [batch(Some(40.0), "2026-03-01T00:00:00Z")];
        let expenses = [expense(Some(10.0), "2026-03-01T00:00:00Z")];
        let claims = [claim(true), claim(false), claim(false)];

        let metrics = dashboard_metrics(&sales, &batches, &expenses, &claims);

        assert_eq!(metrics.profit_loss, 50.0);
        assert_eq!(metrics.sales_count, 1);
        assert_eq!(metrics.warranty_count, 3);
        assert_eq!(metrics.warranty_replaced, 1);
        assert_eq!(metrics.warranty_pending, 2);
    }

    #[test]
    fn monthly_report_filters_by_bucket() {
        let sales = [
            sale(Some(100.0), "2026-01-15T00:00:00Z"),
            sale(Some(900.0), "2026-02-15T00:00:00Z"),
        ];
        let batches = [batch(Some(30.0), "2026-01-20T00:00:00Z")];
        let expenses = [
            expense(Some(20.0), "2026-01-31T00:00:00Z"),
            expense(Some(500.0), "2026-02-01T00:00:00Z"),
        ];

        let report = monthly_report(2026, 1, &sales, &batches, &expenses);

        assert_eq!(report.month, "2026-01");
        assert_eq!(report.total_sales, 100.0);
        assert_eq!(report.total_production, 30.0);
        assert_eq!(report.total_expenses, 20.0);
        assert_eq!(report.profit_loss, 50.0);
    }
}
