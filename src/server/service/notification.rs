//! Transactional emails.
//!
//! Every email is best effort: a failed send is logged and never fails the operation that
//! triggered it.

use crate::server::provider::mailer::{Email, Mailer};

/// Escapes text interpolated into an email body.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn format_euros(cents: i64) -> String {
    format!("{},{:02} EUR", cents / 100, cents % 100)
}

fn layout(title: &str, body: &str, app_url: &str) -> String {
    format!(
        "<div style=\"font-family:sans-serif;max-width:560px\">\
         <h2>{}</h2>{}\
         <p style=\"color:#888;font-size:12px\"><a href=\"{}\">Carelink</a></p></div>",
        escape_html(title),
        body,
        app_url
    )
}

fn when(appointment: &entity::appointment::Model) -> String {
    format!(
        "{} {}-{}",
        appointment.date.format("%d/%m/%Y"),
        appointment.start_time.format("%H:%M"),
        appointment.end_time.format("%H:%M")
    )
}

/// Booking confirmation sent to the family, carrying the PIN to hand to the educator.
pub fn booking_confirmation(
    to: &str,
    educator_name: &str,
    appointment: &entity::appointment::Model,
    app_url: &str,
) -> Email {
    let body = format!(
        "<p>Your appointment with {} on {} is booked. The amount of {} is authorized on your \
         card and only charged once the session took place.</p>\
         <p>Give this PIN code to the educator at the end of the session:</p>\
         <p style=\"font-size:28px;letter-spacing:6px\"><strong>{}</strong></p>",
        escape_html(educator_name),
        when(appointment),
        format_euros(appointment.amount_cents),
        appointment.pin_code
    );

    Email {
        to: to.to_string(),
        subject: "Your Carelink booking is confirmed".to_string(),
        html: layout("Booking confirmed", &body, app_url),
    }
}

/// New booking notification sent to the educator. Never includes the PIN.
pub fn new_booking(
    to: &str,
    family_name: &str,
    appointment: &entity::appointment::Model,
    app_url: &str,
) -> Email {
    let body = format!(
        "<p>{} requested an appointment on {}.</p>\
         <p><a href=\"{}/dashboard/appointments\">Accept or decline the request</a></p>",
        escape_html(family_name),
        when(appointment),
        app_url
    );

    Email {
        to: to.to_string(),
        subject: "New booking request on Carelink".to_string(),
        html: layout("New booking request", &body, app_url),
    }
}

/// Sent to the other participant when an appointment is declined or cancelled.
pub fn appointment_cancelled(
    to: &str,
    appointment: &entity::appointment::Model,
    app_url: &str,
) -> Email {
    let body = format!(
        "<p>The appointment on {} has been cancelled. Any authorized amount has been released.</p>",
        when(appointment)
    );

    Email {
        to: to.to_string(),
        subject: "Carelink appointment cancelled".to_string(),
        html: layout("Appointment cancelled", &body, app_url),
    }
}

/// Review outcome of a certification, sent to its educator.
pub fn certification_reviewed(
    to: &str,
    title: &str,
    approved: bool,
    reason: Option<&str>,
    app_url: &str,
) -> Email {
    let body = if approved {
        format!(
            "<p>Your certification <strong>{}</strong> has been approved.</p>",
            escape_html(title)
        )
    } else {
        format!(
            "<p>Your certification <strong>{}</strong> has been rejected.</p><p>Reason: {}</p>",
            escape_html(title),
            escape_html(reason.unwrap_or_default())
        )
    };

    Email {
        to: to.to_string(),
        subject: "Certification review".to_string(),
        html: layout("Certification review", &body, app_url),
    }
}

/// Sends `email`, logging instead of failing.
pub async fn send_best_effort(mailer: &Mailer, email: Email) {
    if let Err(err) = mailer.send(&email).await {
        tracing::warn!(to = %email.to, subject = %email.subject, "Failed to send email: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use carelink_test_utils::prelude::*;
    use chrono::{NaiveDate, NaiveTime};
    use entity::sea_orm_active_enums::AppointmentStatus;

    use super::*;

    fn appointment() -> entity::appointment::Model {
        factory::appointment(
            1,
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            AppointmentStatus::Pending,
        )
    }

    #[test]
    fn confirmation_carries_pin() {
        let email = booking_confirmation(
            "family@carelink.test",
            "Alex Martin",
            &appointment(),
            "http://localhost:3000",
        );

        assert!(email.html.contains("4821"));
        assert!(email.html.contains("02/03/2026 09:00-10:00"));
        assert!(email.html.contains("60,00 EUR"));
    }

    #[test]
    fn educator_notification_hides_pin() {
        let email = new_booking(
            "edu@carelink.test",
            "Nora Petit",
            &appointment(),
            "http://localhost:3000",
        );

        assert!(!email.html.contains("4821"));
    }

    #[test]
    fn escapes_user_text() {
        let email = certification_reviewed(
            "edu@carelink.test",
            "<script>",
            false,
            Some("Blurry & cropped"),
            "http://localhost:3000",
        );

        assert!(email.html.contains("&lt;script&gt;"));
        assert!(email.html.contains("Blurry &amp; cropped"));
    }

    /// Expect a Resend failure to be swallowed
    #[tokio::test]
    async fn send_failure_is_swallowed() -> Result<(), TestError> {
        let mut test = TestBuilder::new().build().await?;
        let mock = test
            .server
            .mock("POST", "/emails")
            .with_status(500)
            .create_async()
            .await;

        let mailer = Mailer::new(test.server_url(), "re_test", "noreply@carelink.test");
        send_best_effort(
            &mailer,
            new_booking(
                "edu@carelink.test",
                "Nora Petit",
                &appointment(),
                "http://localhost:3000",
            ),
        )
        .await;

        mock.assert_async().await;

        Ok(())
    }
}
