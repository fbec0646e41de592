//! Attendance marking and history

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{Filters, filter_options};
use crate::core::endpoints::attendance as routes;
use crate::core::error::HttpError;
use crate::core::http::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [Self::Present, Self::Absent, Self::Late];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "PRESENT",
            Self::Absent => "ABSENT",
            Self::Late => "LATE",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a bulk mark request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceMark {
    pub student_id: String,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: String,
}

pub struct AttendanceService<'a> {
    client: &'a ApiClient,
}

impl<'a> AttendanceService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn mark(
        &self,
        session_id: &str,
        student_id: &str,
        status: AttendanceStatus,
        notes: &str,
    ) -> Result<Value, HttpError> {
        self.client
            .post(
                routes::MARK,
                &json!({
                    "session_id": session_id,
                    "student_id": student_id,
                    "status": status,
                    "notes": notes,
                }),
            )
            .await
    }

    pub async fn bulk_mark(
        &self,
        session_id: &str,
        records: &[AttendanceMark],
    ) -> Result<Value, HttpError> {
        self.client
            .post(
                routes::BULK_MARK,
                &json!({ "session_id": session_id, "records": records }),
            )
            .await
    }

    pub async fn for_session(
        &self,
        session_id: &str,
        filters: Filters<'_>,
    ) -> Result<Value, HttpError> {
        self.client
            .get_query(&routes::session(session_id), filter_options(filters))
            .await
    }

    pub async fn student_history(
        &self,
        student_id: &str,
        filters: Filters<'_>,
    ) -> Result<Value, HttpError> {
        self.client
            .get_query(&routes::student(student_id), filter_options(filters))
            .await
    }

    pub async fn update(&self, attendance_id: &str, data: &Value) -> Result<Value, HttpError> {
        self.client.put(&routes::record(attendance_id), data).await
    }

    pub async fn list(&self, filters: Filters<'_>) -> Result<Value, HttpError> {
        self.client
            .get_query(routes::BASE, filter_options(filters))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::http::Method;
    use crate::core::testing::{MockTransport, api_client};

    #[tokio::test]
    async fn test_mark_payload() {
        let transport = MockTransport::new();
        transport.push_json(
            Method::Post,
            "/attendance/attendance/mark/",
            201,
            json!({"id": "a-1", "status": "LATE"}),
        );
        let client = api_client(&transport);

        AttendanceService::new(&client)
            .mark("sess-1", "s-1", AttendanceStatus::Late, "bus delay")
            .await
            .unwrap();

        assert_eq!(
            transport.request_json(0),
            json!({
                "session_id": "sess-1",
                "student_id": "s-1",
                "status": "LATE",
                "notes": "bus delay"
            })
        );
    }

    #[tokio::test]
    async fn test_bulk_mark_payload() {
        let transport = MockTransport::new();
        transport.push_json(
            Method::Post,
            "/attendance/attendance/bulk-mark/",
            200,
            json!({"created": 2}),
        );
        let client = api_client(&transport);
        let records = [
            AttendanceMark {
                student_id: "s-1".to_string(),
                status: AttendanceStatus::Present,
                notes: String::new(),
            },
            AttendanceMark {
                student_id: "s-2".to_string(),
                status: AttendanceStatus::Absent,
                notes: "sick".to_string(),
            },
        ];

        AttendanceService::new(&client)
            .bulk_mark("sess-1", &records)
            .await
            .unwrap();

        let body = transport.request_json(0);
        assert_eq!(body["session_id"], "sess-1");
        assert_eq!(body["records"][0]["status"], "PRESENT");
        assert_eq!(body["records"][1]["notes"], "sick");
    }

    #[tokio::test]
    async fn test_session_attendance_route() {
        let transport = MockTransport::new();
        transport.push_json(
            Method::Get,
            "/attendance/attendance/session/sess-1/",
            200,
            json!({"records": []}),
        );
        let client = api_client(&transport);

        AttendanceService::new(&client)
            .for_session("sess-1", &[("status", "ABSENT")])
            .await
            .unwrap();

        assert!(transport.requests()[0].url.ends_with("?status=ABSENT"));
    }

    #[test]
    fn test_status_wire_names() {
        let names: Vec<String> = AttendanceStatus::ALL
            .iter()
            .map(|status| serde_json::to_value(status).unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["PRESENT", "ABSENT", "LATE"]);
        assert_eq!(AttendanceStatus::Late.to_string(), "LATE");
    }
}
