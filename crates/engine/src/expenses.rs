//! The module contains the `Expense` record and its storage entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, money};

/// A business expense.
///
/// `created_at` is required: the forecast buckets expenses by the calendar
/// month of this instant.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub category: Option<String>,
    pub note: Option<String>,
    pub amount: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        category: Option<String>,
        note: Option<String>,
        amount: Option<f64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            note,
            amount,
            created_at,
        }
    }

    /// Expense amount with the absent-means-zero rule applied.
    #[must_use]
    pub fn amount_or_zero(&self) -> f64 {
        money::or_zero(self.amount)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub category: Option<String>,
    pub note: Option<String>,
    pub amount: Option<f64>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(value: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            category: ActiveValue::Set(value.category.clone()),
            note: ActiveValue::Set(value.note.clone()),
            amount: ActiveValue::Set(value.amount),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("expense not exists".to_string()))?,
            category: model.category,
            note: model.note,
            amount: model.amount,
            created_at: model.created_at,
        })
    }
}
