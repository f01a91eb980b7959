//! Pure workflow derivations shared by services.
//!
//! Keeping these as free functions means every caller evaluates the same
//! predicate; there is no per-resource re-implementation of "is this fully
//! approved" or "what is the visa state today".

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::entities::enums::{ApprovalStatus, VisaStatus};

/// True when every approver role is `approved`.
pub fn fully_approved(statuses: &[ApprovalStatus]) -> bool {
    statuses
        .iter()
        .all(|status| *status == ApprovalStatus::Approved)
}

/// Derives the visa state from the expiry date.
///
/// Under 0 days remaining is `Expired`, 0..=30 days is `Expiring Soon`,
/// anything later is `Renewed` except that a record still in `New Visa`
/// keeps that value until it first leaves the 30-day window.
pub fn derive_visa_status(visa_expiry: NaiveDate, today: NaiveDate, current: VisaStatus) -> VisaStatus {
    let remaining = (visa_expiry - today).num_days();
    if remaining < 0 {
        VisaStatus::Expired
    } else if remaining <= 30 {
        VisaStatus::ExpiringSoon
    } else if current == VisaStatus::NewVisa {
        VisaStatus::NewVisa
    } else {
        VisaStatus::Renewed
    }
}

/// Overtime span in hours, rounded to two decimals. An end time at or
/// before the start time is taken to mean the shift ran past midnight.
pub fn overtime_duration_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    let mut span = end - start;
    if span <= Duration::zero() {
        span = span + Duration::days(1);
    }
    let hours = span.num_seconds() as f64 / 3600.0;
    (hours * 100.0).round() / 100.0
}

/// Inclusive day-by-day iterator over a leave span.
pub fn date_span(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    from.iter_days().take_while(move |day| *day <= to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fully_approved_requires_every_role() {
        use ApprovalStatus::*;
        assert!(fully_approved(&[Approved, Approved, Approved]));
        assert!(!fully_approved(&[Approved, Pending, Approved]));
        assert!(!fully_approved(&[Approved, Approved, UnderReview]));
        assert!(!fully_approved(&[Rejected, Approved, Approved]));
    }

    #[rstest]
    #[case(-1, VisaStatus::Renewed, VisaStatus::Expired)]
    #[case(0, VisaStatus::Renewed, VisaStatus::ExpiringSoon)]
    #[case(10, VisaStatus::Renewed, VisaStatus::ExpiringSoon)]
    #[case(30, VisaStatus::NewVisa, VisaStatus::ExpiringSoon)]
    #[case(31, VisaStatus::Renewed, VisaStatus::Renewed)]
    #[case(31, VisaStatus::NewVisa, VisaStatus::NewVisa)]
    #[case(120, VisaStatus::Expired, VisaStatus::Renewed)]
    fn visa_status_derivation(
        #[case] days_from_today: i64,
        #[case] current: VisaStatus,
        #[case] expected: VisaStatus,
    ) {
        let today = date(2026, 3, 1);
        let expiry = today + Duration::days(days_from_today);
        assert_eq!(derive_visa_status(expiry, today, current), expected);
    }

    #[test]
    fn overtime_duration_same_day() {
        let start = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(21, 30, 0).unwrap();
        assert_eq!(overtime_duration_hours(start, end), 3.5);
    }

    #[test]
    fn overtime_duration_wraps_past_midnight() {
        let start = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(2, 0, 0).unwrap();
        assert_eq!(overtime_duration_hours(start, end), 4.0);
    }

    #[test]
    fn date_span_is_inclusive() {
        let days: Vec<_> = date_span(date(2026, 1, 30), date(2026, 2, 2)).collect();
        assert_eq!(
            days,
            vec![
                date(2026, 1, 30),
                date(2026, 1, 31),
                date(2026, 2, 1),
                date(2026, 2, 2)
            ]
        );
    }
}
