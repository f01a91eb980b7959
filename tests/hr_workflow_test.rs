mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, NaiveTime, Utc};
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use backoffice_api::db::DbPool;
use backoffice_api::entities::attendance;
use backoffice_api::entities::enums::{AttendanceStatus, LeaveStatus, StaffKind, VisaStatus};
use backoffice_api::errors::ServiceError;
use backoffice_api::services::leave::{CreateLeaveRequest, LeaveService, UpdateLeaveRequest};
use backoffice_api::services::overtime::{CreateOvertimeRequest, OvertimeService};
use backoffice_api::services::staff::{CreateStaffRequest, StaffService};
use backoffice_api::storage::MediaStore;

fn staff_request(tag: &str, visa_days_from_now: i64) -> CreateStaffRequest {
    let today = Utc::now().date_naive();
    CreateStaffRequest {
        name: format!("Employee {tag}"),
        passport_no: format!("P-{tag}"),
        visa_no: format!("V-{tag}"),
        emirates_id_number: format!("EID-{tag}"),
        designation: "Technician".to_string(),
        nationality: "Indian".to_string(),
        insurance_number: format!("INS-{tag}"),
        email: format!("{tag}@example.com"),
        passport_expiry: today + Duration::days(900),
        visa_expiry: today + Duration::days(visa_days_from_now),
        insurance_expiry: today + Duration::days(365),
        salary: dec!(4500.00),
        emergency_contact: "+971-50-000-0000".to_string(),
        contact_number: "+971-50-111-1111".to_string(),
        home_address: "Home address".to_string(),
        uae_address: "UAE address".to_string(),
    }
}

fn services(db: &Arc<DbPool>, media_root: &std::path::Path) -> (StaffService, LeaveService) {
    let events = common::test_events();
    (
        StaffService::new(db.clone(), MediaStore::new(media_root), events.clone()),
        LeaveService::new(db.clone(), events),
    )
}

#[tokio::test]
async fn staff_ids_are_sequential_per_kind() {
    let db = common::test_db("hr_staff_ids").await;
    let media = tempfile::tempdir().unwrap();
    let (staff, _) = services(&db, media.path());

    let first = staff
        .create(StaffKind::Staff, staff_request("a", 400))
        .await
        .unwrap();
    let second = staff
        .create(StaffKind::Staff, staff_request("b", 400))
        .await
        .unwrap();
    let manpower = staff
        .create(StaffKind::Manpower, staff_request("c", 400))
        .await
        .unwrap();

    assert_eq!(first.staff_id, "S1");
    assert_eq!(second.staff_id, "S2");
    assert_eq!(manpower.staff_id, "M1");
}

#[tokio::test]
async fn visa_status_is_derived_on_create_and_read() {
    let db = common::test_db("hr_visa_status").await;
    let media = tempfile::tempdir().unwrap();
    let (staff, _) = services(&db, media.path());

    let expiring = staff
        .create(StaffKind::Staff, staff_request("expiring", 10))
        .await
        .unwrap();
    assert_eq!(expiring.visa_status, VisaStatus::ExpiringSoon);

    let expired = staff
        .create(StaffKind::Staff, staff_request("expired", -1))
        .await
        .unwrap();
    assert_eq!(expired.visa_status, VisaStatus::Expired);

    // A fresh record out past the window stays in New Visa until it first
    // approaches expiry.
    let fresh = staff
        .create(StaffKind::Staff, staff_request("fresh", 200))
        .await
        .unwrap();
    assert_eq!(fresh.visa_status, VisaStatus::NewVisa);

    let read_back = staff
        .get(StaffKind::Staff, &expiring.staff_id)
        .await
        .unwrap();
    assert_eq!(read_back.visa_status, VisaStatus::ExpiringSoon);
}

#[tokio::test]
async fn staff_lookup_is_kind_scoped() {
    let db = common::test_db("hr_kind_scope").await;
    let media = tempfile::tempdir().unwrap();
    let (staff, _) = services(&db, media.path());

    let created = staff
        .create(StaffKind::Manpower, staff_request("mp", 400))
        .await
        .unwrap();
    let err = staff
        .get(StaffKind::Staff, &created.staff_id)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn approving_leave_creates_attendance_and_unapproving_removes_it() {
    let db = common::test_db("hr_leave_attendance").await;
    let media = tempfile::tempdir().unwrap();
    let (staff, leave) = services(&db, media.path());

    let employee = staff
        .create(StaffKind::Staff, staff_request("leave", 400))
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let created = leave
        .create(
            StaffKind::Staff,
            "hr.clerk",
            CreateLeaveRequest {
                staff_id: employee.staff_id.clone(),
                from_date: today,
                to_date: today + Duration::days(2),
                reason: "Annual leave".to_string(),
                status: None,
                gm_status: None,
                mgmt_status: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.request.status, LeaveStatus::UnderReview);
    assert_eq!(created.request.staff_name, employee.name);

    let on_leave_rows = || async {
        attendance::Entity::find()
            .filter(attendance::Column::StaffId.eq(employee.id))
            .filter(attendance::Column::Status.eq(AttendanceStatus::OnLeave))
            .all(&*db)
            .await
            .unwrap()
    };
    assert!(on_leave_rows().await.is_empty());

    leave
        .update(
            StaffKind::Staff,
            created.request.id,
            UpdateLeaveRequest {
                from_date: None,
                to_date: None,
                reason: None,
                status: Some(LeaveStatus::Approved),
                gm_status: None,
                mgmt_status: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(on_leave_rows().await.len(), 3);

    leave
        .update(
            StaffKind::Staff,
            created.request.id,
            UpdateLeaveRequest {
                from_date: None,
                to_date: None,
                reason: None,
                status: Some(LeaveStatus::Rejected),
                gm_status: None,
                mgmt_status: None,
            },
        )
        .await
        .unwrap();
    assert!(on_leave_rows().await.is_empty());
}

#[tokio::test]
async fn comments_are_owner_guarded() {
    let db = common::test_db("hr_comments").await;
    let media = tempfile::tempdir().unwrap();
    let (staff, leave) = services(&db, media.path());

    let employee = staff
        .create(StaffKind::Staff, staff_request("cmt", 400))
        .await
        .unwrap();
    let today = Utc::now().date_naive();
    let request = leave
        .create(
            StaffKind::Staff,
            "submitter",
            CreateLeaveRequest {
                staff_id: employee.staff_id,
                from_date: today,
                to_date: today,
                reason: "One day".to_string(),
                status: None,
                gm_status: None,
                mgmt_status: None,
            },
        )
        .await
        .unwrap();

    let comment = leave
        .add_comment(StaffKind::Staff, request.request.id, "gm", "Looks fine".into())
        .await
        .unwrap();

    let err = leave
        .delete_comment(StaffKind::Staff, request.request.id, comment.id, "mgmt")
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Forbidden(_));

    leave
        .delete_comment(StaffKind::Staff, request.request.id, comment.id, "gm")
        .await
        .unwrap();
}

#[tokio::test]
async fn leave_date_range_is_validated() {
    let db = common::test_db("hr_leave_dates").await;
    let media = tempfile::tempdir().unwrap();
    let (staff, leave) = services(&db, media.path());

    let employee = staff
        .create(StaffKind::Staff, staff_request("dates", 400))
        .await
        .unwrap();
    let today = Utc::now().date_naive();
    let err = leave
        .create(
            StaffKind::Staff,
            "clerk",
            CreateLeaveRequest {
                staff_id: employee.staff_id,
                from_date: today,
                to_date: today - Duration::days(1),
                reason: "Backwards".to_string(),
                status: None,
                gm_status: None,
                mgmt_status: None,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::FieldErrors(_));
}

#[tokio::test]
async fn overtime_duration_wraps_past_midnight() {
    let db = common::test_db("hr_overtime").await;
    let media = tempfile::tempdir().unwrap();
    let (staff, _) = services(&db, media.path());
    let overtime = OvertimeService::new(db.clone());

    let employee = staff
        .create(StaffKind::Staff, staff_request("ot", 400))
        .await
        .unwrap();
    let created = overtime
        .create(
            StaffKind::Staff,
            "supervisor",
            CreateOvertimeRequest {
                staff_id: employee.staff_id,
                ot_date: Utc::now().date_naive(),
                ot_start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
                ot_end_time: NaiveTime::from_hms_opt(2, 0, 0).unwrap(),
                reason: "Night shift handover".to_string(),
                status: None,
                gm_status: None,
                mgmt_status: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.overtime.duration, 4.0);
}
