use std::sync::Arc;

use chrono::{Datelike, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::enums::{ApprovalStatus, SalesStatus};
use crate::entities::sales_order::{self, Entity as SalesOrderEntity};
use crate::entities::sales_order_item::{self, Entity as SalesOrderItemEntity};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::contacts::ContactService;
use crate::services::ids;
use crate::services::quotes::{validate_totals, QuoteLineInput, QuoteService};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSalesOrderRequest {
    pub company_name: String,
    pub contact_email: String,
    #[serde(default)]
    pub company_email: String,
    /// Quote this order was raised from, when applicable.
    #[serde(default)]
    pub quote_no: Option<String>,
    #[serde(default)]
    pub vat_applicable: bool,
    #[serde(default)]
    pub vat_percentage: f64,
    pub subtotal: f64,
    pub vat_amount: f64,
    pub grand_total: f64,
    #[serde(default)]
    pub notes_remarks: String,
    pub products: Vec<QuoteLineInput>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSalesOrderRequest {
    pub status: Option<SalesStatus>,
    pub accounts_status: Option<ApprovalStatus>,
    pub gm_status: Option<ApprovalStatus>,
    pub mgmt_status: Option<ApprovalStatus>,
    pub notes_remarks: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SalesOrderResponse {
    #[serde(flatten)]
    pub order: sales_order::Model,
    pub products: Vec<sales_order_item::Model>,
    /// Derived from the three approval columns.
    pub fully_approved: bool,
}

pub struct SalesOrderService {
    db: Arc<DbPool>,
    contacts: ContactService,
    quotes: QuoteService,
    event_sender: EventSender,
}

impl SalesOrderService {
    pub fn new(
        db: Arc<DbPool>,
        contacts: ContactService,
        quotes: QuoteService,
        event_sender: EventSender,
    ) -> Self {
        Self {
            db,
            contacts,
            quotes,
            event_sender,
        }
    }

    #[instrument(skip(self, request), fields(company = %request.company_name))]
    pub async fn create(
        &self,
        created_by: Uuid,
        request: CreateSalesOrderRequest,
    ) -> Result<SalesOrderResponse, ServiceError> {
        validate_totals(
            &request.products,
            request.subtotal,
            request.vat_applicable,
            request.vat_percentage,
            request.vat_amount,
            request.grand_total,
        )?;

        if let Some(quote_no) = request.quote_no.as_deref().filter(|q| !q.is_empty()) {
            if self.quotes.find_by_quote_no(quote_no).await?.is_none() {
                return Err(ServiceError::field(
                    "quote_no",
                    format!("Quote {quote_no} does not exist"),
                ));
            }
        }

        let contact = self.contacts.find_by_company(&request.company_name).await?;
        let (contact_name, contact_number) = contact
            .map(|c| (c.contact_name, c.contact_number))
            .unwrap_or_default();

        let order_no = self.allocate_order_no().await?;
        let now = Utc::now();
        let txn = self.db.begin().await?;
        let model = sales_order::ActiveModel {
            order_no: Set(order_no.clone()),
            year: Set(now.year()),
            company_name: Set(request.company_name),
            contact_name: Set(contact_name),
            contact_number: Set(contact_number),
            contact_email: Set(request.contact_email),
            company_email: Set(request.company_email),
            quote_no: Set(request.quote_no.filter(|q| !q.is_empty())),
            status: Set(SalesStatus::New),
            accounts_status: Set(ApprovalStatus::Pending),
            gm_status: Set(ApprovalStatus::Pending),
            mgmt_status: Set(ApprovalStatus::Pending),
            vat_applicable: Set(request.vat_applicable),
            vat_percentage: Set(request.vat_percentage),
            subtotal: Set(request.subtotal),
            vat_amount: Set(request.vat_amount),
            grand_total: Set(request.grand_total),
            notes_remarks: Set(request.notes_remarks),
            created_by: Set(Some(created_by)),
            created_on: Set(now.into()),
            ..Default::default()
        };
        let created = model.insert(&txn).await?;
        for line in &request.products {
            sales_order_item::ActiveModel {
                sales_order_id: Set(created.id),
                product: Set(line.product.clone()),
                specification: Set(line.specification.clone()),
                qty: Set(line.qty),
                unit_price: Set(line.unit_price),
                total_price: Set(f64::from(line.qty) * line.unit_price),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
        txn.commit().await?;

        info!(order_no = %order_no, "sales order created");
        self.response(created.id).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self, year: Option<i32>) -> Result<Vec<SalesOrderResponse>, ServiceError> {
        let mut query = SalesOrderEntity::find().order_by_desc(sales_order::Column::Id);
        if let Some(year) = year {
            query = query.filter(sales_order::Column::Year.eq(year));
        }
        let orders = query.all(&*self.db).await?;
        let mut responses = Vec::with_capacity(orders.len());
        for order in orders {
            responses.push(self.response(order.id).await?);
        }
        Ok(responses)
    }

    pub async fn get(&self, id: i32) -> Result<SalesOrderResponse, ServiceError> {
        self.find(id).await?;
        self.response(id).await
    }

    /// Approver-side update. Each role sets its own column; the derived
    /// `fully_approved` flag flips when the last one lands. No side
    /// effects hang off it.
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        id: i32,
        update: UpdateSalesOrderRequest,
    ) -> Result<SalesOrderResponse, ServiceError> {
        let existing = self.find(id).await?;
        let was_fully_approved = existing.fully_approved();

        let mut active: sales_order::ActiveModel = existing.into();
        if let Some(status) = update.status {
            active.status = Set(status);
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
        if let Some(notes_remarks) = update.notes_remarks {
            active.notes_remarks = Set(notes_remarks);
        }
        let updated = active.update(&*self.db).await?;

        if !was_fully_approved && updated.fully_approved() {
            self.event_sender
                .send(Event::SalesOrderApproved {
                    sales_order_id: updated.id,
                })
                .await;
        }
        self.response(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.find(id).await?;
        existing.delete(&*self.db).await?;
        Ok(())
    }

    /// Distinct company rows for the order form.
    pub async fn order_companies(&self) -> Result<Vec<String>, ServiceError> {
        use sea_orm::QuerySelect;
        let rows: Vec<String> = SalesOrderEntity::find()
            .select_only()
            .column(sales_order::Column::CompanyName)
            .distinct()
            .into_tuple()
            .all(&*self.db)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: i32) -> Result<sales_order::Model, ServiceError> {
        SalesOrderEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Sales order {id} not found")))
    }

    async fn response(&self, id: i32) -> Result<SalesOrderResponse, ServiceError> {
        let order = self.find(id).await?;
        let products = SalesOrderItemEntity::find()
            .filter(sales_order_item::Column::SalesOrderId.eq(order.id))
            .order_by_asc(sales_order_item::Column::Id)
            .all(&*self.db)
            .await?;
        let fully_approved = order.fully_approved();
        Ok(SalesOrderResponse {
            order,
            products,
            fully_approved,
        })
    }

    async fn allocate_order_no(&self) -> Result<String, ServiceError> {
        for _ in 0..ids::MAX_GENERATION_ATTEMPTS {
            let order_no = ids::random_document_no();
            let taken = SalesOrderEntity::find()
                .filter(sales_order::Column::OrderNo.eq(order_no.clone()))
                .one(&*self.db)
                .await?
                .is_some();
            if !taken {
                return Ok(order_no);
            }
        }
        Err(ServiceError::Conflict(
            "Could not allocate a unique order number".to_string(),
        ))
    }
}
