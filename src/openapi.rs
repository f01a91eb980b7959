use utoipa::OpenApi;

use crate::auth::{LoginRequest, TokenPair};
use crate::entities::enums::{
    ApprovalStatus, ProductCondition, ProductKind, RemovalReason, StaffKind, VisaStatus,
};
use crate::errors::{ErrorResponse, FieldViolation};
use crate::services::catalog::CreateProductRequest;
use crate::services::quotes::{CreateQuoteRequest, QuoteLineInput};
use crate::services::removals::{CreateRemovalRequest, RemovalItemInput, UpdateRemovalRequest};
use crate::services::staff::CreateStaffRequest;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Backoffice API",
        description = "HR, inventory, and sales back-office resources"
    ),
    paths(
        crate::handlers::auth::login,
        crate::handlers::staff::list_staff,
        crate::handlers::staff::create_staff,
        crate::handlers::catalog::list_products,
        crate::handlers::removals::create,
        crate::handlers::removals::update,
        crate::handlers::quotes::create,
        crate::handlers::outgoing_mail::create,
    ),
    components(schemas(
        ErrorResponse,
        FieldViolation,
        LoginRequest,
        TokenPair,
        CreateStaffRequest,
        CreateProductRequest,
        CreateRemovalRequest,
        UpdateRemovalRequest,
        RemovalItemInput,
        CreateQuoteRequest,
        QuoteLineInput,
        ApprovalStatus,
        RemovalReason,
        ProductKind,
        ProductCondition,
        StaffKind,
        VisaStatus,
    )),
    tags(
        (name = "hr", description = "Staff records and approval workflows"),
        (name = "inventory", description = "Products, stock, and removal requests"),
        (name = "sales", description = "Contacts, quotes, orders, and mail")
    )
)]
pub struct ApiDoc;
