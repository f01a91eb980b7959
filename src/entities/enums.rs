//! String-valued status enums shared across entities.
//!
//! Every workflow status is a closed enum rather than a free-form string;
//! the wire and column representations match the values listed on each
//! variant.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-role approval state used by removal requests and sales orders.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ApprovalStatus {
    #[sea_orm(string_value = "pending")]
    #[serde(rename = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    #[serde(rename = "approved")]
    Approved,
    #[sea_orm(string_value = "underreview")]
    #[serde(rename = "underreview")]
    UnderReview,
    #[sea_orm(string_value = "rejected")]
    #[serde(rename = "rejected")]
    Rejected,
}

impl Default for ApprovalStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Per-role review state on HR request resources (GM / management columns).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ReviewStatus {
    #[sea_orm(string_value = "Pending")]
    #[serde(rename = "Pending")]
    Pending,
    #[sea_orm(string_value = "Approved")]
    #[serde(rename = "Approved")]
    Approved,
    #[sea_orm(string_value = "Under Review")]
    #[serde(rename = "Under Review")]
    UnderReview,
    #[sea_orm(string_value = "Rejected")]
    #[serde(rename = "Rejected")]
    Rejected,
}

impl Default for ReviewStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Overall leave request state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum LeaveStatus {
    #[sea_orm(string_value = "Approved")]
    #[serde(rename = "Approved")]
    Approved,
    #[sea_orm(string_value = "Under Review")]
    #[serde(rename = "Under Review")]
    UnderReview,
    #[sea_orm(string_value = "Rejected")]
    #[serde(rename = "Rejected")]
    Rejected,
}

impl Default for LeaveStatus {
    fn default() -> Self {
        Self::UnderReview
    }
}

/// Overall loan lifecycle state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum LoanStatus {
    #[sea_orm(string_value = "Pending")]
    #[serde(rename = "Pending")]
    Pending,
    #[sea_orm(string_value = "Approved")]
    #[serde(rename = "Approved")]
    Approved,
    #[sea_orm(string_value = "Cleared")]
    #[serde(rename = "Cleared")]
    Cleared,
}

impl Default for LoanStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Overall state for overtime, fines, and appraisals.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum DecisionStatus {
    #[sea_orm(string_value = "Pending")]
    #[serde(rename = "Pending")]
    Pending,
    #[sea_orm(string_value = "Approved")]
    #[serde(rename = "Approved")]
    Approved,
    #[sea_orm(string_value = "Rejected")]
    #[serde(rename = "Rejected")]
    Rejected,
}

impl Default for DecisionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AttendanceStatus {
    #[sea_orm(string_value = "Present")]
    #[serde(rename = "Present")]
    Present,
    #[sea_orm(string_value = "Absent")]
    #[serde(rename = "Absent")]
    Absent,
    #[sea_orm(string_value = "On Leave")]
    #[serde(rename = "On Leave")]
    OnLeave,
    #[sea_orm(string_value = "Half Day")]
    #[serde(rename = "Half Day")]
    HalfDay,
}

impl Default for AttendanceStatus {
    fn default() -> Self {
        Self::Present
    }
}

/// Derived visa state; see `workflow::derive_visa_status`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum VisaStatus {
    #[sea_orm(string_value = "New Visa")]
    #[serde(rename = "New Visa")]
    NewVisa,
    #[sea_orm(string_value = "Renewed")]
    #[serde(rename = "Renewed")]
    Renewed,
    #[sea_orm(string_value = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    #[sea_orm(string_value = "Expired")]
    #[serde(rename = "Expired")]
    Expired,
    #[sea_orm(string_value = "Expiring Soon")]
    #[serde(rename = "Expiring Soon")]
    ExpiringSoon,
}

impl Default for VisaStatus {
    fn default() -> Self {
        Self::NewVisa
    }
}

/// Staff population addressed by the `staff`/`manpower` path segment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum StaffKind {
    #[sea_orm(string_value = "Staff")]
    #[serde(rename = "Staff")]
    Staff,
    #[sea_orm(string_value = "Manpower")]
    #[serde(rename = "Manpower")]
    Manpower,
}

impl StaffKind {
    /// Resolves a URL path segment against the allow-list.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "staff" => Some(Self::Staff),
            "manpower" => Some(Self::Manpower),
            _ => None,
        }
    }

    /// Prefix used when assigning sequential display ids.
    pub fn id_prefix(self) -> char {
        match self {
            Self::Staff => 'S',
            Self::Manpower => 'M',
        }
    }
}

/// Product population addressed by the `local`/`imported` path segment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum ProductKind {
    #[sea_orm(string_value = "local")]
    #[serde(rename = "local")]
    Local,
    #[sea_orm(string_value = "imported")]
    #[serde(rename = "imported")]
    Imported,
}

impl ProductKind {
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "local" => Some(Self::Local),
            "imported" => Some(Self::Imported),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ProductCondition {
    #[sea_orm(string_value = "new")]
    #[serde(rename = "new")]
    New,
    #[sea_orm(string_value = "used")]
    #[serde(rename = "used")]
    Used,
    #[sea_orm(string_value = "refurbished")]
    #[serde(rename = "refurbished")]
    Refurbished,
}

impl Default for ProductCondition {
    fn default() -> Self {
        Self::New
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum RemovalReason {
    #[sea_orm(string_value = "sales")]
    #[serde(rename = "sales")]
    Sales,
    #[sea_orm(string_value = "deadstock")]
    #[serde(rename = "deadstock")]
    Deadstock,
}

/// Shared lifecycle for inquiries, quotes, and sales orders.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum SalesStatus {
    #[sea_orm(string_value = "new")]
    #[serde(rename = "new")]
    New,
    #[sea_orm(string_value = "open")]
    #[serde(rename = "open")]
    Open,
    #[sea_orm(string_value = "closed")]
    #[serde(rename = "closed")]
    Closed,
}

impl Default for SalesStatus {
    fn default() -> Self {
        Self::New
    }
}

/// Outgoing mail lifecycle; `failed` records a delivery failure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum MailStatus {
    #[sea_orm(string_value = "new")]
    #[serde(rename = "new")]
    New,
    #[sea_orm(string_value = "open")]
    #[serde(rename = "open")]
    Open,
    #[sea_orm(string_value = "closed")]
    #[serde(rename = "closed")]
    Closed,
    #[sea_orm(string_value = "failed")]
    #[serde(rename = "failed")]
    Failed,
}

impl Default for MailStatus {
    fn default() -> Self {
        Self::New
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum JobCardStatus {
    #[sea_orm(string_value = "open")]
    #[serde(rename = "open")]
    Open,
    #[sea_orm(string_value = "in_progress")]
    #[serde(rename = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    #[serde(rename = "completed")]
    Completed,
}

impl Default for JobCardStatus {
    fn default() -> Self {
        Self::Open
    }
}
