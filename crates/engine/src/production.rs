//! The module contains the `ProductionBatch` record and its storage entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, money};

/// A production batch and what it cost to make.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductionBatch {
    pub id: Uuid,
    pub product: Option<String>,
    pub units: Option<i32>,
    pub total_cost: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl ProductionBatch {
    pub fn new(product: Option<String>, units: Option<i32>, total_cost: Option<f64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            product,
            units,
            total_cost,
            created_at: Utc::now(),
        }
    }

    /// Batch cost with the absent-means-zero rule applied.
    #[must_use]
    pub fn cost_or_zero(&self) -> f64 {
        money::or_zero(self.total_cost)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "production")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub product: Option<String>,
    pub units: Option<i32>,
    pub total_cost: Option<f64>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&ProductionBatch> for ActiveModel {
    fn from(value: &ProductionBatch) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            product: ActiveValue::Set(value.product.clone()),
            units: ActiveValue::Set(value.units),
            total_cost: ActiveValue::Set(value.total_cost),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl TryFrom<Model> for ProductionBatch {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("production batch not exists".to_string()))?,
            product: model.product,
            units: model.units,
            total_cost: model.total_cost,
            created_at: model.created_at,
        })
    }
}
