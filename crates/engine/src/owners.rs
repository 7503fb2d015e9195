//! The module contains the `Owner` record and its storage entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, money};

/// A business owner and the capital they have put in.
///
/// `investment_amount` may be absent: records imported from the previous
/// bookkeeping carry no amount, and aggregation treats those as zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Owner {
    /// Stable identifier, generated once and persisted.
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub investment_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Owner {
    pub fn new(name: String, email: Option<String>, investment_amount: Option<f64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            investment_amount,
            created_at: Utc::now(),
        }
    }

    /// Investment with the absent-means-zero rule applied.
    #[must_use]
    pub fn investment_or_zero(&self) -> f64 {
        money::or_zero(self.investment_amount)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "owners")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub investment_amount: Option<f64>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Owner> for ActiveModel {
    fn from(value: &Owner) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            email: ActiveValue::Set(value.email.clone()),
            investment_amount: ActiveValue::Set(value.investment_amount),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl TryFrom<Model> for Owner {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("owner not exists".to_string()))?,
            name: model.name,
            email: model.email,
            investment_amount: model.investment_amount,
            created_at: model.created_at,
        })
    }
}
