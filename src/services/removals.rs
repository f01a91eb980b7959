use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::enums::{ApprovalStatus, ProductKind, RemovalReason};
use crate::entities::product::{self, Entity as ProductEntity};
use crate::entities::removal_request::{self, Entity as RemovalRequestEntity};
use crate::entities::removal_request_item::{self, Entity as RemovalRequestItemEntity};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::ids;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RemovalItemInput {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRemovalRequest {
    pub removal_reason: RemovalReason,
    #[serde(default)]
    pub remarks: String,
    pub product_items: Vec<RemovalItemInput>,
    #[serde(default)]
    pub accounts_status: Option<ApprovalStatus>,
    #[serde(default)]
    pub gm_status: Option<ApprovalStatus>,
    #[serde(default)]
    pub mgmt_status: Option<ApprovalStatus>,
}

/// Partial update; items are fixed at creation time.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRemovalRequest {
    pub remarks: Option<String>,
    pub gm_remarks: Option<String>,
    pub mgmt_remarks: Option<String>,
    pub accounts_status: Option<ApprovalStatus>,
    pub gm_status: Option<ApprovalStatus>,
    pub mgmt_status: Option<ApprovalStatus>,
}

#[derive(Debug, Serialize)]
pub struct RemovalRequestResponse {
    #[serde(flatten)]
    pub request: removal_request::Model,
    pub product_items: Vec<removal_request_item::Model>,
    pub products: Vec<product::Model>,
}

/// What the deduction pass did for a given save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeductionOutcome {
    /// Counters were decremented and the flag set in this call.
    Applied,
    /// Conditions not met (not fully approved, or already deducted).
    NotEligible,
}

#[derive(Clone)]
pub struct RemovalService {
    db: Arc<DbPool>,
    event_sender: EventSender,
}

impl RemovalService {
    pub fn new(db: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, request), fields(reason = ?request.removal_reason))]
    pub async fn create(
        &self,
        kind: ProductKind,
        requested_by: Uuid,
        request: CreateRemovalRequest,
    ) -> Result<RemovalRequestResponse, ServiceError> {
        // Validate every line before anything is written.
        let mut products = Vec::with_capacity(request.product_items.len());
        for item in &request.product_items {
            if item.quantity < 1 {
                return Err(ServiceError::field(
                    "quantity",
                    "Quantity must be at least 1",
                ));
            }
            let product = ProductEntity::find_by_id(item.product_id)
                .one(&*self.db)
                .await?
                .ok_or_else(|| {
                    ServiceError::field(
                        "product_items",
                        format!("Product {} does not exist", item.product_id),
                    )
                })?;
            if product.kind != kind {
                return Err(ServiceError::field(
                    "product_items",
                    format!(
                        "Product {} kind does not match request kind",
                        product.product_id
                    ),
                ));
            }
            if item.quantity > product.stock_count {
                return Err(ServiceError::field(
                    "quantity",
                    format!(
                        "Quantity ({}) exceeds available stock ({}) for product {}",
                        item.quantity, product.stock_count, product.product_name
                    ),
                ));
            }
            products.push(product);
        }

        let request_no = self.allocate_request_no().await?;
        let txn = self.db.begin().await?;
        let model = removal_request::ActiveModel {
            request_no: Set(request_no.clone()),
            kind: Set(kind),
            removal_reason: Set(request.removal_reason),
            remarks: Set(request.remarks),
            accounts_status: Set(request.accounts_status.unwrap_or_default()),
            gm_status: Set(request.gm_status.unwrap_or_default()),
            mgmt_status: Set(request.mgmt_status.unwrap_or_default()),
            requested_by: Set(Some(requested_by)),
            created_date: Set(Utc::now().into()),
            gm_remarks: Set(String::new()),
            mgmt_remarks: Set(String::new()),
            stock_deducted: Set(false),
            ..Default::default()
        };
        let created = model.insert(&txn).await?;

        for item in &request.product_items {
            removal_request_item::ActiveModel {
                request_id: Set(created.id),
                product_id: Set(item.product_id),
                quantity: Set(item.quantity),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
        txn.commit().await?;
        info!(request_no = %request_no, "removal request created");

        // A request created already fully approved deducts immediately.
        self.apply_stock_deduction(created.id).await?;
        self.response(kind, created.id).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self, kind: ProductKind) -> Result<Vec<RemovalRequestResponse>, ServiceError> {
        let requests = RemovalRequestEntity::find()
            .filter(removal_request::Column::Kind.eq(kind))
            .order_by_desc(removal_request::Column::Id)
            .all(&*self.db)
            .await?;
        let mut responses = Vec::with_capacity(requests.len());
        for request in requests {
            responses.push(self.response(kind, request.id).await?);
        }
        Ok(responses)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, kind: ProductKind, id: i32) -> Result<RemovalRequestResponse, ServiceError> {
        self.find_scoped(kind, id).await?;
        self.response(kind, id).await
    }

    /// Saves approver-side fields, then re-evaluates the deduction
    /// condition exactly once for this save.
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        kind: ProductKind,
        id: i32,
        update: UpdateRemovalRequest,
    ) -> Result<RemovalRequestResponse, ServiceError> {
        let existing = self.find_scoped(kind, id).await?;

        let mut active: removal_request::ActiveModel = existing.into();
        if let Some(remarks) = update.remarks {
            active.remarks = Set(remarks);
        }
        if let Some(gm_remarks) = update.gm_remarks {
            active.gm_remarks = Set(gm_remarks);
        }
        if let Some(mgmt_remarks) = update.mgmt_remarks {
            active.mgmt_remarks = Set(mgmt_remarks);
        }
        if let Some(accounts_status) = update.accounts_status {
            active.accounts_status = Set(accounts_status);
        }
        if let Some(gm_status) = update.gm_status {
            active.gm_status = Set(gm_status);
        }
        if let Some(mgmt_status) = update.mgmt_status {
            active.mgmt_status = Set(mgmt_status);
        }
        active.update(&*self.db).await?;

        self.apply_stock_deduction(id).await?;
        self.response(kind, id).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, kind: ProductKind, id: i32) -> Result<(), ServiceError> {
        let existing = self.find_scoped(kind, id).await?;
        existing.delete(&*self.db).await?;
        Ok(())
    }

    /// The single deduction routine, evaluated after every save.
    ///
    /// Inside one transaction: atomically claim the `stock_deducted` flag
    /// (guarded on all three approvals and the flag being unset), then
    /// decrement both counters per item with a conditional update that
    /// refuses to go negative. Any shortfall rolls the whole batch back,
    /// including the claim, so a later save retries. The conditional
    /// claim makes concurrent saves of the same request deduct at most
    /// once.
    #[instrument(skip(self))]
    pub async fn apply_stock_deduction(&self, request_id: i32) -> Result<DeductionOutcome, ServiceError> {
        let txn = self.db.begin().await?;

        let claimed = RemovalRequestEntity::update_many()
            .col_expr(removal_request::Column::StockDeducted, Expr::value(true))
            .filter(removal_request::Column::Id.eq(request_id))
            .filter(removal_request::Column::StockDeducted.eq(false))
            .filter(removal_request::Column::AccountsStatus.eq(ApprovalStatus::Approved))
            .filter(removal_request::Column::GmStatus.eq(ApprovalStatus::Approved))
            .filter(removal_request::Column::MgmtStatus.eq(ApprovalStatus::Approved))
            .exec(&txn)
            .await?;
        if claimed.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(DeductionOutcome::NotEligible);
        }

        let items = RemovalRequestItemEntity::find()
            .filter(removal_request_item::Column::RequestId.eq(request_id))
            .all(&txn)
            .await?;

        for item in &items {
            let deducted = ProductEntity::update_many()
                .col_expr(
                    product::Column::StockCount,
                    Expr::col(product::Column::StockCount).sub(item.quantity),
                )
                .col_expr(
                    product::Column::QuantityAdded,
                    Expr::col(product::Column::QuantityAdded).sub(item.quantity),
                )
                .filter(product::Column::Id.eq(item.product_id))
                .filter(product::Column::StockCount.gte(item.quantity))
                .filter(product::Column::QuantityAdded.gte(item.quantity))
                .exec(&txn)
                .await?;
            if deducted.rows_affected == 0 {
                txn.rollback().await?;
                warn!(
                    request_id,
                    product_id = item.product_id,
                    quantity = item.quantity,
                    "insufficient stock, removal deduction aborted"
                );
                return Err(ServiceError::InsufficientStock(format!(
                    "Insufficient stock for product {} (requested {})",
                    item.product_id, item.quantity
                )));
            }
        }

        txn.commit().await?;

        let request_no = RemovalRequestEntity::find_by_id(request_id)
            .one(&*self.db)
            .await?
            .map(|r| r.request_no)
            .unwrap_or_default();
        info!(request_id, request_no = %request_no, "stock deducted for removal request");
        self.event_sender
            .send(Event::StockDeducted {
                removal_request_id: request_id,
                request_no,
            })
            .await;
        Ok(DeductionOutcome::Applied)
    }

    async fn allocate_request_no(&self) -> Result<String, ServiceError> {
        for _ in 0..ids::MAX_GENERATION_ATTEMPTS {
            let request_no = ids::random_five_digits();
            let taken = RemovalRequestEntity::find()
                .filter(removal_request::Column::RequestNo.eq(request_no.clone()))
                .one(&*self.db)
                .await?
                .is_some();
            if !taken {
                return Ok(request_no);
            }
        }
        Err(ServiceError::Conflict(
            "Could not allocate a unique request number".to_string(),
        ))
    }

    async fn find_scoped(
        &self,
        kind: ProductKind,
        id: i32,
    ) -> Result<removal_request::Model, ServiceError> {
        RemovalRequestEntity::find_by_id(id)
            .filter(removal_request::Column::Kind.eq(kind))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Removal request not found".to_string()))
    }

    async fn response(
        &self,
        kind: ProductKind,
        id: i32,
    ) -> Result<RemovalRequestResponse, ServiceError> {
        let request = self.find_scoped(kind, id).await?;
        let items = RemovalRequestItemEntity::find()
            .filter(removal_request_item::Column::RequestId.eq(request.id))
            .order_by_asc(removal_request_item::Column::Id)
            .all(&*self.db)
            .await?;
        let mut products = Vec::with_capacity(items.len());
        for item in &items {
            if let Some(product) = ProductEntity::find_by_id(item.product_id).one(&*self.db).await? {
                products.push(product);
            }
        }
        Ok(RemovalRequestResponse {
            request,
            product_items: items,
            products,
        })
    }
}
