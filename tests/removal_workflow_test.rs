mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use sea_orm::EntityTrait;
use uuid::Uuid;

use backoffice_api::db::DbPool;
use backoffice_api::entities::enums::{ApprovalStatus, ProductKind, RemovalReason};
use backoffice_api::entities::{product, removal_request};
use backoffice_api::errors::ServiceError;
use backoffice_api::services::catalog::{
    CatalogService, CategoryRequest, CreateProductRequest, SubcategoryRequest,
};
use backoffice_api::services::removals::{
    CreateRemovalRequest, RemovalItemInput, RemovalService, UpdateRemovalRequest,
};
use backoffice_api::services::stock::{CreateStockHistoryRequest, StockService};

struct Fixture {
    db: Arc<DbPool>,
    catalog: CatalogService,
    stock: StockService,
    removals: RemovalService,
    user: Uuid,
}

async fn fixture(name: &str) -> Fixture {
    let db = common::test_db(name).await;
    let events = common::test_events();
    Fixture {
        catalog: CatalogService::new(db.clone()),
        stock: StockService::new(db.clone(), events.clone()),
        removals: RemovalService::new(db.clone(), events),
        user: Uuid::new_v4(),
        db,
    }
}

impl Fixture {
    /// Creates a product of the kind with the given opening stock.
    async fn product_with_stock(&self, kind: ProductKind, part_no: &str, stock: i32) -> i32 {
        let category = self
            .catalog
            .create_category(CategoryRequest {
                name: format!("cat-{part_no}"),
            })
            .await
            .expect("category");
        let subcategory = self
            .catalog
            .create_subcategory(SubcategoryRequest {
                name: format!("sub-{part_no}"),
                category_id: category.id,
            })
            .await
            .expect("subcategory");

        let origin = match kind {
            ProductKind::Imported => Some("Germany".to_string()),
            ProductKind::Local => None,
        };
        let created = self
            .catalog
            .create_product(
                kind,
                self.user,
                CreateProductRequest {
                    category_id: category.id,
                    subcategory_id: subcategory.id,
                    product_name: format!("Product {part_no}"),
                    description: String::new(),
                    part_no: part_no.to_string(),
                    storage_location: "A-01".to_string(),
                    remarks: String::new(),
                    origin,
                    measurement_unit: "pcs".to_string(),
                    condition: Default::default(),
                },
            )
            .await
            .expect("product");

        if stock > 0 {
            self.stock
                .create(
                    kind,
                    self.user,
                    CreateStockHistoryRequest {
                        product_id: created.product.id,
                        quantity_added: stock,
                        remarks: "opening stock".to_string(),
                    },
                )
                .await
                .expect("stock");
        }
        created.product.id
    }

    async fn product_counts(&self, id: i32) -> (i32, i32) {
        let record = product::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .unwrap()
            .unwrap();
        (record.stock_count, record.quantity_added)
    }

    async fn approve(&self, request_id: i32, update: UpdateRemovalRequest) {
        self.removals
            .update(ProductKind::Local, request_id, update)
            .await
            .expect("update");
    }
}

fn set_status(
    accounts: Option<ApprovalStatus>,
    gm: Option<ApprovalStatus>,
    mgmt: Option<ApprovalStatus>,
) -> UpdateRemovalRequest {
    UpdateRemovalRequest {
        remarks: None,
        gm_remarks: None,
        mgmt_remarks: None,
        accounts_status: accounts,
        gm_status: gm,
        mgmt_status: mgmt,
    }
}

#[tokio::test]
async fn deduction_fires_once_after_all_three_approvals() {
    let fx = fixture("removal_full_approval").await;
    let product_id = fx.product_with_stock(ProductKind::Local, "PN-100", 10).await;

    let created = fx
        .removals
        .create(
            ProductKind::Local,
            fx.user,
            CreateRemovalRequest {
                removal_reason: RemovalReason::Sales,
                remarks: String::new(),
                product_items: vec![RemovalItemInput {
                    product_id,
                    quantity: 4,
                }],
                accounts_status: None,
                gm_status: None,
                mgmt_status: None,
            },
        )
        .await
        .expect("create removal request");
    let request_id = created.request.id;
    assert_eq!(created.request.request_no.len(), 5);
    assert!(!created.request.stock_deducted);

    // Approvals land one role at a time, in any order; nothing happens
    // until the last one.
    fx.approve(request_id, set_status(Some(ApprovalStatus::Approved), None, None))
        .await;
    assert_eq!(fx.product_counts(product_id).await, (10, 10));

    fx.approve(request_id, set_status(None, None, Some(ApprovalStatus::Approved)))
        .await;
    assert_eq!(fx.product_counts(product_id).await, (10, 10));

    fx.approve(request_id, set_status(None, Some(ApprovalStatus::Approved), None))
        .await;
    assert_eq!(fx.product_counts(product_id).await, (6, 6));

    let after = fx
        .removals
        .get(ProductKind::Local, request_id)
        .await
        .unwrap();
    assert!(after.request.stock_deducted);

    // A further save with statuses unchanged must not deduct again.
    fx.approve(request_id, set_status(None, Some(ApprovalStatus::Approved), None))
        .await;
    assert_eq!(fx.product_counts(product_id).await, (6, 6));

    // Withdrawing an approval afterwards never reverses the deduction.
    fx.approve(request_id, set_status(None, Some(ApprovalStatus::Rejected), None))
        .await;
    assert_eq!(fx.product_counts(product_id).await, (6, 6));
    let after = fx
        .removals
        .get(ProductKind::Local, request_id)
        .await
        .unwrap();
    assert!(after.request.stock_deducted);
}

#[tokio::test]
async fn over_stock_item_rejected_before_any_row_is_written() {
    let fx = fixture("removal_over_stock").await;
    let product_id = fx.product_with_stock(ProductKind::Local, "PN-200", 3).await;

    let err = fx
        .removals
        .create(
            ProductKind::Local,
            fx.user,
            CreateRemovalRequest {
                removal_reason: RemovalReason::Deadstock,
                remarks: String::new(),
                product_items: vec![RemovalItemInput {
                    product_id,
                    quantity: 5,
                }],
                accounts_status: None,
                gm_status: None,
                mgmt_status: None,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::FieldErrors(_));

    let requests = removal_request::Entity::find().all(&*fx.db).await.unwrap();
    assert!(requests.is_empty());
    assert_eq!(fx.product_counts(product_id).await, (3, 3));
}

#[tokio::test]
async fn kind_mismatch_item_rejected() {
    let fx = fixture("removal_kind_mismatch").await;
    let imported = fx
        .product_with_stock(ProductKind::Imported, "PN-300", 5)
        .await;

    let err = fx
        .removals
        .create(
            ProductKind::Local,
            fx.user,
            CreateRemovalRequest {
                removal_reason: RemovalReason::Sales,
                remarks: String::new(),
                product_items: vec![RemovalItemInput {
                    product_id: imported,
                    quantity: 1,
                }],
                accounts_status: None,
                gm_status: None,
                mgmt_status: None,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::FieldErrors(_));
}

#[tokio::test]
async fn insufficient_stock_aborts_whole_batch_and_allows_retry() {
    let fx = fixture("removal_insufficient").await;
    let first = fx.product_with_stock(ProductKind::Local, "PN-400", 10).await;
    let second = fx.product_with_stock(ProductKind::Local, "PN-401", 10).await;

    // Two requests against the same product; both pass creation-time
    // validation because neither alone exceeds the stock.
    let make = |qty_first: i32| CreateRemovalRequest {
        removal_reason: RemovalReason::Sales,
        remarks: String::new(),
        product_items: vec![
            RemovalItemInput {
                product_id: first,
                quantity: qty_first,
            },
            RemovalItemInput {
                product_id: second,
                quantity: 2,
            },
        ],
        accounts_status: None,
        gm_status: None,
        mgmt_status: None,
    };
    let request_a = fx
        .removals
        .create(ProductKind::Local, fx.user, make(8))
        .await
        .unwrap()
        .request
        .id;
    let request_b = fx
        .removals
        .create(ProductKind::Local, fx.user, make(8))
        .await
        .unwrap()
        .request
        .id;

    let all_approved = || {
        set_status(
            Some(ApprovalStatus::Approved),
            Some(ApprovalStatus::Approved),
            Some(ApprovalStatus::Approved),
        )
    };

    fx.approve(request_a, all_approved()).await;
    assert_eq!(fx.product_counts(first).await, (2, 2));
    assert_eq!(fx.product_counts(second).await, (8, 8));

    // Request B now cannot be satisfied; the batch must abort without
    // touching either product, and the flag stays unset for a retry.
    let err = fx
        .removals
        .update(ProductKind::Local, request_b, all_approved())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InsufficientStock(_));
    assert_eq!(fx.product_counts(first).await, (2, 2));
    assert_eq!(fx.product_counts(second).await, (8, 8));
    let b = fx
        .removals
        .get(ProductKind::Local, request_b)
        .await
        .unwrap();
    assert!(!b.request.stock_deducted);

    // Replenish and save again: the pending condition is re-evaluated and
    // the deduction goes through this time.
    fx.stock
        .create(
            ProductKind::Local,
            fx.user,
            CreateStockHistoryRequest {
                product_id: first,
                quantity_added: 10,
                remarks: String::new(),
            },
        )
        .await
        .unwrap();
    fx.approve(request_b, all_approved()).await;
    assert_eq!(fx.product_counts(first).await, (4, 4));
    assert_eq!(fx.product_counts(second).await, (6, 6));
    let b = fx
        .removals
        .get(ProductKind::Local, request_b)
        .await
        .unwrap();
    assert!(b.request.stock_deducted);
}

#[tokio::test]
async fn request_created_fully_approved_deducts_immediately() {
    let fx = fixture("removal_created_approved").await;
    let product_id = fx.product_with_stock(ProductKind::Local, "PN-500", 10).await;

    let created = fx
        .removals
        .create(
            ProductKind::Local,
            fx.user,
            CreateRemovalRequest {
                removal_reason: RemovalReason::Sales,
                remarks: String::new(),
                product_items: vec![RemovalItemInput {
                    product_id,
                    quantity: 4,
                }],
                accounts_status: Some(ApprovalStatus::Approved),
                gm_status: Some(ApprovalStatus::Approved),
                mgmt_status: Some(ApprovalStatus::Approved),
            },
        )
        .await
        .unwrap();
    assert!(created.request.stock_deducted);
    assert_eq!(fx.product_counts(product_id).await, (6, 6));
}
