//! Email notifications: weekly reports and low-attendance alerts

use serde_json::{Value, json};

use crate::core::endpoints::notifications as routes;
use crate::core::error::HttpError;
use crate::core::http::{ApiClient, RequestOptions};

/// Attendance percentage below which students are alerted
pub const DEFAULT_LOW_ATTENDANCE_THRESHOLD: f64 = 75.0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFilters {
    pub notification_type: Option<String>,
    pub status: Option<String>,
    pub recipient_email: Option<String>,
}

impl NotificationFilters {
    fn to_options(&self) -> RequestOptions {
        RequestOptions::default()
            .query_opt("notification_type", self.notification_type.as_deref())
            .query_opt("status", self.status.as_deref())
            .query_opt("recipient_email", self.recipient_email.as_deref())
    }
}

pub struct NotificationsService<'a> {
    client: &'a ApiClient,
}

impl<'a> NotificationsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Email weekly attendance reports to all students or to the listed ones
    pub async fn trigger_weekly_reports(
        &self,
        send_to_all: bool,
        student_emails: &[String],
    ) -> Result<Value, HttpError> {
        self.client
            .post(
                routes::TRIGGER_WEEKLY,
                &json!({ "send_to_all": send_to_all, "student_emails": student_emails }),
            )
            .await
    }

    pub async fn trigger_low_attendance_alerts(
        &self,
        threshold: Option<f64>,
    ) -> Result<Value, HttpError> {
        let threshold = threshold.unwrap_or(DEFAULT_LOW_ATTENDANCE_THRESHOLD);
        self.client
            .post(routes::TRIGGER_LOW_ATTENDANCE, &json!({ "threshold": threshold }))
            .await
    }

    pub async fn list(&self, filters: &NotificationFilters) -> Result<Value, HttpError> {
        self.client.get_query(routes::LIST, filters.to_options()).await
    }

    pub async fn detail(&self, notification_id: &str) -> Result<Value, HttpError> {
        self.client.get(&routes::detail(notification_id)).await
    }
}
