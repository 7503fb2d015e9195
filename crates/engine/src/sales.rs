//! The module contains the `Sale` record and its storage entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, money};

/// A completed sale.
///
/// `date` is the instant the sale refers to (used by the monthly report);
/// `created_at` is when the record entered the system.
#[derive(Clone, Debug, PartialEq)]
pub struct Sale {
    pub id: Uuid,
    pub customer: Option<String>,
    pub total_amount: Option<f64>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    pub fn new(customer: Option<String>, total_amount: Option<f64>, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer,
            total_amount,
            date,
            created_at: Utc::now(),
        }
    }

    /// Sale total with the absent-means-zero rule applied.
    #[must_use]
    pub fn total_or_zero(&self) -> f64 {
        money::or_zero(self.total_amount)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub customer: Option<String>,
    pub total_amount: Option<f64>,
    pub date: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Sale> for ActiveModel {
    fn from(value: &Sale) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            customer: ActiveValue::Set(value.customer.clone()),
            total_amount: ActiveValue::Set(value.total_amount),
            date: ActiveValue::Set(value.date),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl TryFrom<Model> for Sale {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("sale not exists".to_string()))?,
            customer: model.customer,
            total_amount: model.total_amount,
            date: model.date,
            created_at: model.created_at,
        })
    }
}
