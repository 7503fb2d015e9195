//! Store-backed engine for the Luxen business backend.
//!
//! [`Engine`] wraps an explicitly injected [`DatabaseConnection`] and owns
//! every record operation: owners, sales, production batches, expenses and
//! warranty claims. Reports are pure functions in [`reports`]; the engine
//! only gathers the snapshot they need and delegates, so repeated or
//! concurrent report requests never interfere.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, QueryOrder, prelude::*};
use uuid::Uuid;

pub use error::EngineError;
pub use expenses::Expense;
pub use owners::Owner;
pub use production::ProductionBatch;
pub use reports::{
    Confidence, DashboardMetrics, ExpenseForecast, MonthlyReport, OwnerShare, ShareReport,
};
pub use sales::Sale;
pub use warranty::WarrantyClaim;

mod error;
mod expenses;
mod money;
mod owners;
mod production;
pub mod reports;
mod sales;
mod warranty;

type ResultEngine<T> = Result<T, EngineError>;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Records a new owner.
    pub async fn add_owner(
        &self,
        name: &str,
        email: Option<&str>,
        investment_amount: Option<f64>,
    ) -> ResultEngine<Uuid> {
        if let Some(amount) = investment_amount
            && amount < 0.0
        {
            return Err(EngineError::InvalidAmount(
                "investment_amount must be >= 0".to_string(),
            ));
        }

        let owner = Owner::new(
            name.to_string(),
            email.map(|s| s.to_string()),
            investment_amount,
        );
        owners::ActiveModel::from(&owner)
            .insert(&self.database)
            .await?;
        Ok(owner.id)
    }

    /// Returns every owner, oldest first.
    pub async fn owners(&self) -> ResultEngine<Vec<Owner>> {
        let models = owners::Entity::find()
            .order_by_asc(owners::Column::CreatedAt)
            .all(&self.database)
            .await?;
        models.into_iter().map(Owner::try_from).collect()
    }

    /// Deletes an owner.
    pub async fn remove_owner(&self, id: Uuid) -> ResultEngine<()> {
        let result = owners::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("owner not exists".to_string()));
        }
        Ok(())
    }

    /// Records a completed sale.
    pub async fn record_sale(
        &self,
        customer: Option<&str>,
        total_amount: Option<f64>,
        date: DateTime<Utc>,
    ) -> ResultEngine<Uuid> {
        if let Some(amount) = total_amount
            && amount < 0.0
        {
            return Err(EngineError::InvalidAmount(
                "total_amount must be >= 0".to_string(),
            ));
        }

        let sale = Sale::new(customer.map(|s| s.to_string()), total_amount, date);
        sales::ActiveModel::from(&sale)
            .insert(&self.database)
            .await?;
        Ok(sale.id)
    }

    /// Returns every sale, oldest first.
    pub async fn sales(&self) -> ResultEngine<Vec<Sale>> {
        let models = sales::Entity::find()
            .order_by_asc(sales::Column::CreatedAt)
            .all(&self.database)
            .await?;
        models.into_iter().map(Sale::try_from).collect()
    }

    /// Deletes a sale.
    pub async fn remove_sale(&self, id: Uuid) -> ResultEngine<()> {
        let result = sales::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("sale not exists".to_string()));
        }
        Ok(())
    }

    /// Records a production batch.
    pub async fn record_production(
        &self,
        product: Option<&str>,
        units: Option<i32>,
        total_cost: Option<f64>,
    ) -> ResultEngine<Uuid> {
        if let Some(cost) = total_cost
            && cost < 0.0
        {
            return Err(EngineError::InvalidAmount(
                "total_cost must be >= 0".to_string(),
            ));
        }

        let batch = ProductionBatch::new(product.map(|s| s.to_string()), units, total_cost);
        production::ActiveModel::from(&batch)
            .insert(&self.database)
            .await?;
        Ok(batch.id)
    }

    /// Returns every production batch, oldest first.
    pub async fn production_batches(&self) -> ResultEngine<Vec<ProductionBatch>> {
        let models = production::Entity::find()
            .order_by_asc(production::Column::CreatedAt)
            .all(&self.database)
            .await?;
        models.into_iter().map(ProductionBatch::try_from).collect()
    }

    /// Deletes a production batch.
    pub async fn remove_production(&self, id: Uuid) -> ResultEngine<()> {
        let result = production::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(
                "production batch not exists".to_string(),
            ));
        }
        Ok(())
    }

    /// Records an expense.
    ///
    /// `created_at` decides which calendar month the expense lands in when
    /// the forecast buckets history.
    pub async fn record_expense(
        &self,
        category: Option<&str>,
        note: Option<&str>,
        amount: Option<f64>,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Uuid> {
        if let Some(amount) = amount
            && amount < 0.0
        {
            return Err(EngineError::InvalidAmount(
                "amount must be >= 0".to_string(),
            ));
        }

        let expense = Expense::new(
            category.map(|s| s.to_string()),
            note.map(|s| s.to_string()),
            amount,
            created_at,
        );
        expenses::ActiveModel::from(&expense)
            .insert(&self.database)
            .await?;
        Ok(expense.id)
    }

    /// Returns every expense, oldest first.
    pub async fn expenses(&self) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .order_by_asc(expenses::Column::CreatedAt)
            .all(&self.database)
            .await?;
        models.into_iter().map(Expense::try_from).collect()
    }

    /// Deletes an expense.
    pub async fn remove_expense(&self, id: Uuid) -> ResultEngine<()> {
        let result = expenses::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("expense not exists".to_string()));
        }
        Ok(())
    }

    /// Opens a warranty claim (pending until marked replaced).
    pub async fn open_warranty_claim(
        &self,
        customer: Option<&str>,
        product: Option<&str>,
    ) -> ResultEngine<Uuid> {
        let claim = WarrantyClaim::new(
            customer.map(|s| s.to_string()),
            product.map(|s| s.to_string()),
        );
        warranty::ActiveModel::from(&claim)
            .insert(&self.database)
            .await?;
        Ok(claim.id)
    }

    /// Returns every warranty claim, oldest first.
    pub async fn warranty_claims(&self) -> ResultEngine<Vec<WarrantyClaim>> {
        let models = warranty::Entity::find()
            .order_by_asc(warranty::Column::CreatedAt)
            .all(&self.database)
            .await?;
        models.into_iter().map(WarrantyClaim::try_from).collect()
    }

    /// Marks a warranty claim replaced (or pending again).
    pub async fn set_warranty_replaced(&self, id: Uuid, replaced: bool) -> ResultEngine<()> {
        let Some(model) = warranty::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
        else {
            return Err(EngineError::KeyNotFound(
                "warranty claim not exists".to_string(),
            ));
        };

        let mut claim: warranty::ActiveModel = model.into();
        claim.replaced = ActiveValue::Set(replaced);
        claim.update(&self.database).await?;
        Ok(())
    }

    /// Deletes a warranty claim.
    pub async fn remove_warranty_claim(&self, id: Uuid) -> ResultEngine<()> {
        let result = warranty::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(
                "warranty claim not exists".to_string(),
            ));
        }
        Ok(())
    }

    /// Owner profit-share breakdown over the current snapshot.
    pub async fn owner_share_report(&self) -> ResultEngine<ShareReport> {
        let owners = self.owners().await?;
        let sales = self.sales().await?;
        let batches = self.production_batches().await?;
        let expenses = self.expenses().await?;

        Ok(reports::owner_shares(&owners, &sales, &batches, &expenses))
    }

    /// Next-month expense forecast over the current snapshot.
    pub async fn expense_forecast(&self) -> ResultEngine<ExpenseForecast> {
        let expenses = self.expenses().await?;
        Ok(reports::forecast_expenses(&expenses))
    }

    /// Dashboard totals and counts over the current snapshot.
    pub async fn dashboard_metrics(&self) -> ResultEngine<DashboardMetrics> {
        let sales = self.sales().await?;
        let batches = self.production_batches().await?;
        let expenses = self.expenses().await?;
        let claims = self.warranty_claims().await?;

        Ok(reports::dashboard_metrics(
            &sales, &batches, &expenses, &claims,
        ))
    }

    /// Totals restricted to one calendar month.
    pub async fn monthly_report(&self, year: i32, month: u32) -> ResultEngine<MonthlyReport> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidAmount(
                "month must be between 1 and 12".to_string(),
            ));
        }

        let sales = self.sales().await?;
        let batches = self.production_batches().await?;
        let expenses = self.expenses().await?;

        Ok(reports::monthly_report(
            year, month, &sales, &batches, &expenses,
        ))
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}
