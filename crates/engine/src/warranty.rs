//! The module contains the `WarrantyClaim` record and its storage entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::EngineError;

/// A warranty claim filed by a customer.
///
/// A claim is pending until the product has been `replaced`.
#[derive(Clone, Debug, PartialEq)]
pub struct WarrantyClaim {
    pub id: Uuid,
    pub customer: Option<String>,
    pub product: Option<String>,
    pub replaced: bool,
    pub created_at: DateTime<Utc>,
}

impl WarrantyClaim {
    pub fn new(customer: Option<String>, product: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer,
            product,
            replaced: false,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "warranty")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub customer: Option<String>,
    pub product: Option<String>,
    pub replaced: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&WarrantyClaim> for ActiveModel {
    fn from(value: &WarrantyClaim) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            customer: ActiveValue::Set(value.customer.clone()),
            product: ActiveValue::Set(value.product.clone()),
            replaced: ActiveValue::Set(value.replaced),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl TryFrom<Model> for WarrantyClaim {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("warranty claim not exists".to_string()))?,
            customer: model.customer,
            product: model.product,
            replaced: model.replaced,
            created_at: model.created_at,
        })
    }
}
