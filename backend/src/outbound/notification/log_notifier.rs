//! Notifier that records each notice as a structured log event.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{NotifierError, ReservationNotice, ReservationNotifier};

/// Emits one `info` event per new reservation addressed to the admin.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReservationNotifier;

#[async_trait]
impl ReservationNotifier for LogReservationNotifier {
    async fn reservation_created(&self, notice: &ReservationNotice) -> Result<(), NotifierError> {
        if notice.recipient.trim().is_empty() {
            return Err(NotifierError::NoRecipient);
        }
        let reservation = &notice.reservation;
        info!(
            target: "booking::notification",
            recipient = %notice.recipient,
            reservation_id = %reservation.id,
            resource_id = %reservation.resource_id,
            calendar_date = %reservation.calendar_date,
            local_start_time = %reservation.local_start_time.format("%H:%M"),
            duration_minutes = reservation.duration_minutes,
            customer = %reservation.customer.name,
            service = %reservation.service_label,
            "new reservation notice"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CustomerContact, FacilityZone, Reservation, ReservationId, ResourceId,
    };
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use rstest::rstest;

    fn notice(recipient: &str) -> ReservationNotice {
        let start = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).single().expect("instant");
        ReservationNotice {
            reservation: Reservation {
                id: ReservationId::from("RES_1"),
                resource_id: ResourceId::from("PISTA_01"),
                calendar_date: NaiveDate::from_ymd_opt(2026, 1, 15).expect("date"),
                local_start_time: NaiveTime::from_hms_opt(10, 0, 0).expect("time"),
                duration_minutes: 60,
                start,
                end: start + chrono::Duration::minutes(60),
                customer: CustomerContact {
                    name: "Ana".to_owned(),
                    phone: None,
                    email: None,
                },
                service_id: "padel".to_owned(),
                service_label: "padel".to_owned(),
                time_zone: FacilityZone::parse("Europe/Madrid").expect("zone"),
                created_at: start,
            },
            recipient: recipient.to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn accepts_notice_with_recipient() {
        LogReservationNotifier
            .reservation_created(&notice("admin@example.com"))
            .await
            .expect("delivered");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn refuses_notice_without_recipient(#[case] recipient: &str) {
        let err = LogReservationNotifier
            .reservation_created(&notice(recipient))
            .await
            .expect_err("no recipient");

        assert_eq!(err, NotifierError::NoRecipient);
    }
}
