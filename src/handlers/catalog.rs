use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::auth::AuthUser;
use crate::entities::{category, subcategory};
use crate::errors::ServiceError;
use crate::handlers::product_kind;
use crate::services::catalog::{
    CategoryRequest, CreateProductRequest, ProductResponse, SubcategoryRequest,
    UpdateProductRequest,
};
use crate::{ApiResponse, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route(
            "/subcategories",
            get(list_subcategories).post(create_subcategory),
        )
        .route(
            "/subcategories/:id",
            get(get_subcategory)
                .put(update_subcategory)
                .delete(delete_subcategory),
        )
        .route("/:kind/products", get(list_products).post(create_product))
        .route(
            "/:kind/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn list_categories(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<ApiResponse<Vec<category::Model>>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.catalog.list_categories().await?,
    )))
}

pub async fn create_category(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<CategoryRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.catalog.create_category(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_category(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<category::Model>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.catalog.get_category(id).await?,
    )))
}

pub async fn update_category(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Json(request): Json<CategoryRequest>,
) -> Result<Json<ApiResponse<category::Model>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.catalog.update_category(id, request).await?,
    )))
}

pub async fn delete_category(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.catalog.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_subcategories(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<ApiResponse<Vec<subcategory::Model>>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.catalog.list_subcategories().await?,
    )))
}

pub async fn create_subcategory(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<SubcategoryRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.catalog.create_subcategory(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_subcategory(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<subcategory::Model>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state.services.catalog.get_subcategory(id).await?,
    )))
}

pub async fn update_subcategory(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
    Json(request): Json<SubcategoryRequest>,
) -> Result<Json<ApiResponse<subcategory::Model>>, ServiceError> {
    Ok(Json(ApiResponse::success(
        state
            .services
            .catalog
            .update_subcategory(id, request)
            .await?,
    )))
}

pub async fn delete_subcategory(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.catalog.delete_subcategory(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/inventory/{kind}/products",
    params(("kind" = String, Path, description = "local or imported")),
    responses(
        (status = 200, description = "Products of the kind"),
        (status = 404, description = "Unknown product kind", body = crate::errors::ErrorResponse)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(kind): Path<String>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, ServiceError> {
    let kind = product_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.catalog.list_products(kind).await?,
    )))
}

pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(kind): Path<String>,
    Json(request): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let kind = product_kind(&kind)?;
    let created = state
        .services
        .catalog
        .create_product(kind, user.id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

pub async fn get_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, id)): Path<(String, i32)>,
) -> Result<Json<ApiResponse<ProductResponse>>, ServiceError> {
    let kind = product_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state.services.catalog.get_product(kind, id).await?,
    )))
}

pub async fn update_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, id)): Path<(String, i32)>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ApiResponse<ProductResponse>>, ServiceError> {
    let kind = product_kind(&kind)?;
    Ok(Json(ApiResponse::success(
        state
            .services
            .catalog
            .update_product(kind, id, request)
            .await?,
    )))
}

pub async fn delete_product(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((kind, id)): Path<(String, i32)>,
) -> Result<StatusCode, ServiceError> {
    let kind = product_kind(&kind)?;
    state.services.catalog.delete_product(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
