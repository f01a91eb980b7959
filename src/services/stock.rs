use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::enums::ProductKind;
use crate::entities::product::{self, Entity as ProductEntity};
use crate::entities::stock_history::{self, Entity as StockHistoryEntity};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStockHistoryRequest {
    pub product_id: i32,
    pub quantity_added: i32,
    #[serde(default)]
    pub remarks: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStockHistoryRequest {
    pub remarks: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StockHistoryResponse {
    #[serde(flatten)]
    pub entry: stock_history::Model,
    pub product: product::Model,
}

/// Stock additions. Creating an entry increments the product counters in
/// the same transaction; editing an entry only touches its remarks, the
/// counters are append-only from this path.
#[derive(Clone)]
pub struct StockService {
    db: Arc<DbPool>,
    event_sender: EventSender,
}

impl StockService {
    pub fn new(db: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, request), fields(product_id = request.product_id, quantity = request.quantity_added))]
    pub async fn create(
        &self,
        kind: ProductKind,
        added_by: Uuid,
        request: CreateStockHistoryRequest,
    ) -> Result<StockHistoryResponse, ServiceError> {
        if request.quantity_added < 1 {
            return Err(ServiceError::field(
                "quantity_added",
                "Quantity must be at least 1",
            ));
        }
        let product = ProductEntity::find_by_id(request.product_id)
            .filter(product::Column::Kind.eq(kind))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::field("product_id", "Product does not exist"))?;

        let txn = self.db.begin().await?;
        ProductEntity::update_many()
            .col_expr(
                product::Column::StockCount,
                Expr::col(product::Column::StockCount).add(request.quantity_added),
            )
            .col_expr(
                product::Column::QuantityAdded,
                Expr::col(product::Column::QuantityAdded).add(request.quantity_added),
            )
            .filter(product::Column::Id.eq(product.id))
            .exec(&txn)
            .await?;

        let entry = stock_history::ActiveModel {
            product_id: Set(product.id),
            quantity_added: Set(request.quantity_added),
            added_by: Set(Some(added_by)),
            added_on: Set(Utc::now().into()),
            remarks: Set(request.remarks),
            ..Default::default()
        };
        let entry = entry.insert(&txn).await?;
        txn.commit().await?;

        info!(
            product_id = product.id,
            quantity = request.quantity_added,
            "stock received"
        );
        self.event_sender
            .send(Event::StockReceived {
                product_id: product.id,
                quantity: request.quantity_added,
            })
            .await;

        let product = ProductEntity::find_by_id(product.id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::InternalError("product vanished".into()))?;
        Ok(StockHistoryResponse { entry, product })
    }

    #[instrument(skip(self))]
    pub async fn list(&self, kind: ProductKind) -> Result<Vec<StockHistoryResponse>, ServiceError> {
        let rows = StockHistoryEntity::find()
            .find_also_related(ProductEntity)
            .filter(product::Column::Kind.eq(kind))
            .order_by_desc(stock_history::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(entry, product)| product.map(|p| StockHistoryResponse { entry, product: p }))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, kind: ProductKind, id: i32) -> Result<StockHistoryResponse, ServiceError> {
        let (entry, product) = self.find_scoped(kind, id).await?;
        Ok(StockHistoryResponse { entry, product })
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        kind: ProductKind,
        id: i32,
        request: UpdateStockHistoryRequest,
    ) -> Result<StockHistoryResponse, ServiceError> {
        let (entry, product) = self.find_scoped(kind, id).await?;
        let mut active: stock_history::ActiveModel = entry.into();
        if let Some(remarks) = request.remarks {
            active.remarks = Set(remarks);
        }
        let updated = active.update(&*self.db).await?;
        Ok(StockHistoryResponse {
            entry: updated,
            product,
        })
    }

    /// Deletes the history row without reversing the counters; corrections
    /// go through removal requests.
    #[instrument(skip(self))]
    pub async fn delete(&self, kind: ProductKind, id: i32) -> Result<(), ServiceError> {
        let (entry, _) = self.find_scoped(kind, id).await?;
        entry.delete(&*self.db).await?;
        Ok(())
    }

    async fn find_scoped(
        &self,
        kind: ProductKind,
        id: i32,
    ) -> Result<(stock_history::Model, product::Model), ServiceError> {
        let row = StockHistoryEntity::find_by_id(id)
            .find_also_related(ProductEntity)
            .one(&*self.db)
            .await?;
        match row {
            Some((entry, Some(product))) if product.kind == kind => Ok((entry, product)),
            _ => Err(ServiceError::NotFound(
                "Stock history entry not found".to_string(),
            )),
        }
    }
}
