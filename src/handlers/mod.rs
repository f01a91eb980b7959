pub mod appraisals;
pub mod attendance;
pub mod auth;
pub mod catalog;
pub mod contacts;
pub mod fines;
pub mod inquiries;
pub mod job_cards;
pub mod leave;
pub mod loans;
pub mod outgoing_mail;
pub mod overtime;
pub mod quotes;
pub mod removals;
pub mod sales_orders;
pub mod staff;
pub mod stock;

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::entities::enums::{ProductKind, StaffKind};
use crate::errors::ServiceError;
use crate::events::EventSender;
use crate::mailer::Mailer;
use crate::services::appraisals::AppraisalService;
use crate::services::attendance::AttendanceService;
use crate::services::catalog::CatalogService;
use crate::services::contacts::ContactService;
use crate::services::fines::FineService;
use crate::services::inquiries::InquiryService;
use crate::services::job_cards::JobCardService;
use crate::services::leave::LeaveService;
use crate::services::loans::LoanService;
use crate::services::outgoing_mail::OutgoingMailService;
use crate::services::overtime::OvertimeService;
use crate::services::quotes::QuoteService;
use crate::services::removals::RemovalService;
use crate::services::sales_orders::SalesOrderService;
use crate::services::staff::StaffService;
use crate::services::stock::StockService;
use crate::storage::MediaStore;

/// Resolves the `staff`/`manpower` path segment; anything else is a 404.
pub fn staff_kind(segment: &str) -> Result<StaffKind, ServiceError> {
    StaffKind::from_segment(segment).ok_or_else(|| {
        ServiceError::NotFound(format!(
            "Invalid staff type '{segment}'. Must be 'staff' or 'manpower'."
        ))
    })
}

/// Resolves the `local`/`imported` path segment; anything else is a 404.
pub fn product_kind(segment: &str) -> Result<ProductKind, ServiceError> {
    ProductKind::from_segment(segment).ok_or_else(|| {
        ServiceError::NotFound(format!(
            "Invalid product type '{segment}'. Must be 'local' or 'imported'."
        ))
    })
}

/// `?year=` filter shared by the sales list endpoints.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct YearQuery {
    pub year: Option<i32>,
}

/// `?staff_id=` filter shared by the HR list endpoints.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StaffIdQuery {
    pub staff_id: Option<String>,
}

/// Body for comment creation on HR request resources.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CommentBody {
    pub comment: String,
}

/// Every service used by the HTTP layer, built once at startup.
#[derive(Clone)]
pub struct AppServices {
    pub auth: Arc<AuthService>,
    pub staff: Arc<StaffService>,
    pub attendance: Arc<AttendanceService>,
    pub leave: Arc<LeaveService>,
    pub loans: Arc<LoanService>,
    pub overtime: Arc<OvertimeService>,
    pub fines: Arc<FineService>,
    pub appraisals: Arc<AppraisalService>,
    pub catalog: Arc<CatalogService>,
    pub stock: Arc<StockService>,
    pub removals: Arc<RemovalService>,
    pub contacts: Arc<ContactService>,
    pub inquiries: Arc<InquiryService>,
    pub quotes: Arc<QuoteService>,
    pub outgoing_mail: Arc<OutgoingMailService>,
    pub sales_orders: Arc<SalesOrderService>,
    pub job_cards: Arc<JobCardService>,
}

impl AppServices {
    pub fn new(
        db: Arc<DbPool>,
        config: &AppConfig,
        event_sender: EventSender,
        mailer: Arc<Mailer>,
    ) -> Self {
        let media = MediaStore::new(config.media_root.clone());
        let auth = Arc::new(AuthService::new(
            db.clone(),
            &config.jwt_secret,
            Duration::from_secs(config.jwt_expiration),
            Duration::from_secs(config.refresh_token_expiration),
        ));

        let contacts = ContactService::new(db.clone(), media.clone());
        let quotes = QuoteService::new(
            db.clone(),
            contacts.clone(),
            media.clone(),
            config.company.clone(),
            event_sender.clone(),
        );

        Self {
            auth,
            staff: Arc::new(StaffService::new(
                db.clone(),
                media.clone(),
                event_sender.clone(),
            )),
            attendance: Arc::new(AttendanceService::new(db.clone())),
            leave: Arc::new(LeaveService::new(db.clone(), event_sender.clone())),
            loans: Arc::new(LoanService::new(db.clone())),
            overtime: Arc::new(OvertimeService::new(db.clone())),
            fines: Arc::new(FineService::new(db.clone())),
            appraisals: Arc::new(AppraisalService::new(db.clone())),
            catalog: Arc::new(CatalogService::new(db.clone())),
            stock: Arc::new(StockService::new(db.clone(), event_sender.clone())),
            removals: Arc::new(RemovalService::new(db.clone(), event_sender.clone())),
            inquiries: Arc::new(InquiryService::new(db.clone(), contacts.clone())),
            outgoing_mail: Arc::new(OutgoingMailService::new(
                db.clone(),
                contacts.clone(),
                quotes.clone(),
                mailer,
                media.clone(),
                event_sender.clone(),
            )),
            sales_orders: Arc::new(SalesOrderService::new(
                db.clone(),
                contacts.clone(),
                quotes.clone(),
                event_sender.clone(),
            )),
            job_cards: Arc::new(JobCardService::new(db)),
            contacts: Arc::new(contacts),
            quotes: Arc::new(quotes),
        }
    }
}
