//! Class sessions (a lesson during which attendance is taken)

use serde_json::{Value, json};

use super::{Filters, filter_options};
use crate::core::endpoints::sessions as routes;
use crate::core::error::HttpError;
use crate::core::http::ApiClient;

pub struct SessionsService<'a> {
    client: &'a ApiClient,
}

impl<'a> SessionsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn start(&self, class_id: &str) -> Result<Value, HttpError> {
        self.client
            .post(routes::START, &json!({ "class_id": class_id }))
            .await
    }

    /// Filters: `class_id`, `teacher_id`, `subject_id`
    pub async fn active(&self, filters: Filters<'_>) -> Result<Value, HttpError> {
        self.client
            .get_query(routes::ACTIVE, filter_options(filters))
            .await
    }

    pub async fn end(&self, session_id: &str) -> Result<Value, HttpError> {
        self.client.post(&routes::end(session_id), &json!({})).await
    }

    pub async fn details(&self, session_id: &str) -> Result<Value, HttpError> {
        self.client.get(&routes::detail(session_id)).await
    }

    /// Filters: `date_from`, `date_to`, `status`, ...
    pub async fn history(&self, filters: Filters<'_>) -> Result<Value, HttpError> {
        self.client
            .get_query(routes::HISTORY, filter_options(filters))
            .await
    }

    pub async fn list(&self) -> Result<Value, HttpError> {
        self.client.get(routes::BASE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::http::Method;
    use crate::core::testing::{MockTransport, api_client};

    #[tokio::test]
    async fn test_start_session() {
        let transport = MockTransport::new();
        transport.push_json(
            Method::Post,
            "/sessions/sessions/start/",
            201,
            json!({"id": "sess-1", "status": "ACTIVE"}),
        );
        let client = api_client(&transport);

        let session = SessionsService::new(&client).start("c-1").await.unwrap();

        assert_eq!(session["status"], "ACTIVE");
        assert_eq!(transport.request_json(0), json!({"class_id": "c-1"}));
    }

    #[tokio::test]
    async fn test_active_sessions_with_filters() {
        let transport = MockTransport::new();
        transport.push_json(Method::Get, "/sessions/sessions/active/", 200, json!([]));
        let client = api_client(&transport);

        SessionsService::new(&client)
            .active(&[("class_id", "c-1"), ("teacher_id", "t 2")])
            .await
            .unwrap();

        assert!(
            transport.requests()[0]
                .url
                .ends_with("/sessions/sessions/active/?class_id=c-1&teacher_id=t%202")
        );
    }

    #[tokio::test]
    async fn test_end_session() {
        let transport = MockTransport::new();
        transport.push_json(
            Method::Post,
            "/sessions/sessions/sess-1/end/",
            200,
            json!({"id": "sess-1", "status": "ENDED"}),
        );
        let client = api_client(&transport);

        let session = SessionsService::new(&client).end("sess-1").await.unwrap();

        assert_eq!(session["status"], "ENDED");
        assert_eq!(transport.request_json(0), json!({}));
    }
}
