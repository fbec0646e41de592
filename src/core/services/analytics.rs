//! Attendance statistics per student and per class

use serde_json::Value;

use crate::core::endpoints::analytics as routes;
use crate::core::error::HttpError;
use crate::core::http::ApiClient;

pub struct AnalyticsService<'a> {
    client: &'a ApiClient,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn student(&self, student_id: &str) -> Result<Value, HttpError> {
        self.client.get(&routes::student(student_id)).await
    }

    pub async fn student_quick(&self, student_id: &str) -> Result<Value, HttpError> {
        self.client.get(&routes::student_quick(student_id)).await
    }

    pub async fn class(&self, class_id: &str) -> Result<Value, HttpError> {
        self.client.get(&routes::class(class_id)).await
    }

    pub async fn class_quick(&self, class_id: &str) -> Result<Value, HttpError> {
        self.client.get(&routes::class_quick(class_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::http::Method;
    use crate::core::testing::{MockTransport, api_client};
    use serde_json::json;

    #[tokio::test]
    async fn test_quick_stats_routes() {
        let transport = MockTransport::new();
        transport.push_json(
            Method::Get,
            "/analytics/student/s-1/quick/",
            200,
            json!({"attendance_rate": 92.5}),
        );
        transport.push_json(
            Method::Get,
            "/analytics/class/c-1/quick/",
            200,
            json!({"average_rate": 81.0}),
        );
        let client = api_client(&transport);
        let service = AnalyticsService::new(&client);

        let student = service.student_quick("s-1").await.unwrap();
        let class = service.class_quick("c-1").await.unwrap();

        assert_eq!(student["attendance_rate"], 92.5);
        assert_eq!(class["average_rate"], 81.0);
        assert_eq!(transport.remaining(), 0);
    }
}
