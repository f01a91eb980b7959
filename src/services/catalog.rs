use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::category::{self, Entity as CategoryEntity};
use crate::entities::enums::{ProductCondition, ProductKind};
use crate::entities::product::{self, Entity as ProductEntity};
use crate::entities::subcategory::{self, Entity as SubcategoryEntity};
use crate::errors::ServiceError;
use crate::services::ids;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubcategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    pub category_id: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    pub category_id: i32,
    pub subcategory_id: i32,
    #[validate(length(min = 1, max = 200, message = "Product name is required"))]
    pub product_name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, max = 100, message = "Part number is required"))]
    pub part_no: String,
    #[validate(length(min = 1, max = 200, message = "Storage location is required"))]
    pub storage_location: String,
    #[serde(default)]
    pub remarks: String,
    pub origin: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Measurement unit is required"))]
    pub measurement_unit: String,
    #[serde(default)]
    pub condition: ProductCondition,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub category_id: Option<i32>,
    pub subcategory_id: Option<i32>,
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub part_no: Option<String>,
    pub storage_location: Option<String>,
    pub remarks: Option<String>,
    pub origin: Option<String>,
    pub measurement_unit: Option<String>,
    pub condition: Option<ProductCondition>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: product::Model,
    pub category: Option<category::Model>,
    pub subcategory: Option<subcategory::Model>,
}

/// Origin is mandatory for imported products and must be absent for local
/// ones.
fn check_origin(kind: ProductKind, origin: &Option<String>) -> Result<(), ServiceError> {
    let has_origin = origin.as_ref().is_some_and(|o| !o.trim().is_empty());
    match kind {
        ProductKind::Imported if !has_origin => Err(ServiceError::field(
            "origin",
            "Origin is required for imported products",
        )),
        ProductKind::Local if has_origin => Err(ServiceError::field(
            "origin",
            "Origin should not be set for local products",
        )),
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DbPool>,
}

impl CatalogService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    // ---- categories ----

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_category(
        &self,
        request: CategoryRequest,
    ) -> Result<category::Model, ServiceError> {
        request.validate()?;
        let existing = CategoryEntity::find()
            .filter(category::Column::Name.eq(request.name.clone()))
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::field("name", "Category already exists"));
        }
        let model = category::ActiveModel {
            name: Set(request.name),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        Ok(model.insert(&*self.db).await?)
    }

    pub async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
        Ok(CategoryEntity::find()
            .order_by_asc(category::Column::Id)
            .all(&*self.db)
            .await?)
    }

    pub async fn get_category(&self, id: i32) -> Result<category::Model, ServiceError> {
        CategoryEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {id} not found")))
    }

    #[instrument(skip(self, request))]
    pub async fn update_category(
        &self,
        id: i32,
        request: CategoryRequest,
    ) -> Result<category::Model, ServiceError> {
        request.validate()?;
        let existing = self.get_category(id).await?;
        let mut active: category::ActiveModel = existing.into();
        active.name = Set(request.name);
        Ok(active.update(&*self.db).await?)
    }

    pub async fn delete_category(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get_category(id).await?;
        existing.delete(&*self.db).await?;
        Ok(())
    }

    // ---- subcategories ----

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_subcategory(
        &self,
        request: SubcategoryRequest,
    ) -> Result<subcategory::Model, ServiceError> {
        request.validate()?;
        self.get_category(request.category_id).await.map_err(|_| {
            ServiceError::field("category_id", "Category does not exist")
        })?;
        let duplicate = SubcategoryEntity::find()
            .filter(subcategory::Column::Name.eq(request.name.clone()))
            .filter(subcategory::Column::CategoryId.eq(request.category_id))
            .one(&*self.db)
            .await?;
        if duplicate.is_some() {
            return Err(ServiceError::field(
                "name",
                "Subcategory already exists in this category",
            ));
        }
        let model = subcategory::ActiveModel {
            name: Set(request.name),
            category_id: Set(request.category_id),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        Ok(model.insert(&*self.db).await?)
    }

    pub async fn list_subcategories(&self) -> Result<Vec<subcategory::Model>, ServiceError> {
        Ok(SubcategoryEntity::find()
            .order_by_asc(subcategory::Column::Id)
            .all(&*self.db)
            .await?)
    }

    pub async fn get_subcategory(&self, id: i32) -> Result<subcategory::Model, ServiceError> {
        SubcategoryEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Subcategory {id} not found")))
    }

    #[instrument(skip(self, request))]
    pub async fn update_subcategory(
        &self,
        id: i32,
        request: SubcategoryRequest,
    ) -> Result<subcategory::Model, ServiceError> {
        request.validate()?;
        self.get_category(request.category_id).await.map_err(|_| {
            ServiceError::field("category_id", "Category does not exist")
        })?;
        let existing = self.get_subcategory(id).await?;
        let mut active: subcategory::ActiveModel = existing.into();
        active.name = Set(request.name);
        active.category_id = Set(request.category_id);
        Ok(active.update(&*self.db).await?)
    }

    pub async fn delete_subcategory(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get_subcategory(id).await?;
        existing.delete(&*self.db).await?;
        Ok(())
    }

    // ---- products ----

    #[instrument(skip(self, request), fields(part_no = %request.part_no))]
    pub async fn create_product(
        &self,
        kind: ProductKind,
        added_by: Uuid,
        request: CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        request.validate()?;
        check_origin(kind, &request.origin)?;
        self.get_category(request.category_id)
            .await
            .map_err(|_| ServiceError::field("category_id", "Category does not exist"))?;
        let subcategory = self
            .get_subcategory(request.subcategory_id)
            .await
            .map_err(|_| ServiceError::field("subcategory_id", "Subcategory does not exist"))?;
        if subcategory.category_id != request.category_id {
            return Err(ServiceError::field(
                "subcategory_id",
                "Subcategory does not belong to the given category",
            ));
        }

        let mut last_err = None;
        for _ in 0..ids::MAX_GENERATION_ATTEMPTS {
            let display_id = ids::random_five_digits();
            let taken = ProductEntity::find()
                .filter(product::Column::ProductId.eq(display_id.clone()))
                .one(&*self.db)
                .await?
                .is_some();
            if taken {
                last_err = Some(ServiceError::Conflict(
                    "Could not allocate a unique product id".to_string(),
                ));
                continue;
            }

            let model = product::ActiveModel {
                product_id: Set(display_id),
                kind: Set(kind),
                category_id: Set(Some(request.category_id)),
                subcategory_id: Set(Some(request.subcategory_id)),
                product_name: Set(request.product_name.clone()),
                description: Set(request.description.clone()),
                part_no: Set(request.part_no.clone()),
                storage_location: Set(request.storage_location.clone()),
                remarks: Set(request.remarks.clone()),
                origin: Set(request.origin.clone().filter(|o| !o.trim().is_empty())),
                measurement_unit: Set(request.measurement_unit.clone()),
                stock_count: Set(0),
                quantity_added: Set(0),
                condition: Set(request.condition),
                added_by: Set(Some(added_by)),
                added_on: Set(Utc::now().into()),
                ..Default::default()
            };
            let created = model.insert(&*self.db).await?;
            return self.product_response(created).await;
        }
        Err(last_err.unwrap_or_else(|| {
            ServiceError::Conflict("Could not allocate a unique product id".to_string())
        }))
    }

    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        kind: ProductKind,
    ) -> Result<Vec<ProductResponse>, ServiceError> {
        let rows = ProductEntity::find()
            .filter(product::Column::Kind.eq(kind))
            .order_by_asc(product::Column::Id)
            .all(&*self.db)
            .await?;
        let mut responses = Vec::with_capacity(rows.len());
        for row in rows {
            responses.push(self.product_response(row).await?);
        }
        Ok(responses)
    }

    pub async fn get_product(
        &self,
        kind: ProductKind,
        id: i32,
    ) -> Result<ProductResponse, ServiceError> {
        let record = self.find_product(kind, id).await?;
        self.product_response(record).await
    }

    #[instrument(skip(self, request))]
    pub async fn update_product(
        &self,
        kind: ProductKind,
        id: i32,
        request: UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        let existing = self.find_product(kind, id).await?;

        let origin = match &request.origin {
            Some(_) => request.origin.clone().filter(|o| !o.trim().is_empty()),
            None => existing.origin.clone(),
        };
        check_origin(kind, &origin)?;

        let mut active: product::ActiveModel = existing.into();
        if let Some(category_id) = request.category_id {
            self.get_category(category_id)
                .await
                .map_err(|_| ServiceError::field("category_id", "Category does not exist"))?;
            active.category_id = Set(Some(category_id));
        }
        if let Some(subcategory_id) = request.subcategory_id {
            self.get_subcategory(subcategory_id)
                .await
                .map_err(|_| ServiceError::field("subcategory_id", "Subcategory does not exist"))?;
            active.subcategory_id = Set(Some(subcategory_id));
        }
        if let Some(product_name) = request.product_name {
            active.product_name = Set(product_name);
        }
        if let Some(description) = request.description {
            active.description = Set(description);
        }
        if let Some(part_no) = request.part_no {
            active.part_no = Set(part_no);
        }
        if let Some(storage_location) = request.storage_location {
            active.storage_location = Set(storage_location);
        }
        if let Some(remarks) = request.remarks {
            active.remarks = Set(remarks);
        }
        active.origin = Set(origin);
        if let Some(measurement_unit) = request.measurement_unit {
            active.measurement_unit = Set(measurement_unit);
        }
        if let Some(condition) = request.condition {
            active.condition = Set(condition);
        }
        let updated = active.update(&*self.db).await?;
        self.product_response(updated).await
    }

    pub async fn delete_product(&self, kind: ProductKind, id: i32) -> Result<(), ServiceError> {
        let existing = self.find_product(kind, id).await?;
        existing.delete(&*self.db).await?;
        Ok(())
    }

    pub async fn find_product(
        &self,
        kind: ProductKind,
        id: i32,
    ) -> Result<product::Model, ServiceError> {
        ProductEntity::find_by_id(id)
            .filter(product::Column::Kind.eq(kind))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {id} not found")))
    }

    async fn product_response(
        &self,
        record: product::Model,
    ) -> Result<ProductResponse, ServiceError> {
        let category = match record.category_id {
            Some(category_id) => CategoryEntity::find_by_id(category_id).one(&*self.db).await?,
            None => None,
        };
        let subcategory = match record.subcategory_id {
            Some(subcategory_id) => {
                SubcategoryEntity::find_by_id(subcategory_id)
                    .one(&*self.db)
                    .await?
            }
            None => None,
        };
        Ok(ProductResponse {
            product: record,
            category,
            subcategory,
        })
    }
}
