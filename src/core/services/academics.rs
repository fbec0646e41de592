//! Subjects, classes, students and enrollments

use serde_json::{Value, json};

use crate::core::endpoints::academics as routes;
use crate::core::error::HttpError;
use crate::core::http::{ApiClient, RequestOptions};

pub struct AcademicsService<'a> {
    client: &'a ApiClient,
}

impl<'a> AcademicsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn subjects(&self) -> Result<Value, HttpError> {
        self.client.get(routes::SUBJECTS).await
    }

    pub async fn subject(&self, id: &str) -> Result<Value, HttpError> {
        self.client.get(&routes::subject(id)).await
    }

    pub async fn create_subject(&self, data: &Value) -> Result<Value, HttpError> {
        self.client.post(routes::SUBJECTS, data).await
    }

    pub async fn update_subject(&self, id: &str, data: &Value) -> Result<Value, HttpError> {
        self.client.put(&routes::subject(id), data).await
    }

    pub async fn delete_subject(&self, id: &str) -> Result<Value, HttpError> {
        self.client.delete(&routes::subject(id)).await
    }

    pub async fn classes(&self) -> Result<Value, HttpError> {
        self.client.get(routes::CLASSES).await
    }

    pub async fn class(&self, id: &str) -> Result<Value, HttpError> {
        self.client.get(&routes::class(id)).await
    }

    pub async fn create_class(&self, data: &Value) -> Result<Value, HttpError> {
        self.client.post(routes::CLASSES, data).await
    }

    pub async fn update_class(&self, id: &str, data: &Value) -> Result<Value, HttpError> {
        self.client.put(&routes::class(id), data).await
    }

    pub async fn delete_class(&self, id: &str) -> Result<Value, HttpError> {
        self.client.delete(&routes::class(id)).await
    }

    /// Students, optionally restricted to one class
    pub async fn students(&self, class_id: Option<&str>) -> Result<Value, HttpError> {
        let options = RequestOptions::default().query_opt("class_id", class_id);
        self.client.get_query(routes::STUDENTS, options).await
    }

    pub async fn student(&self, id: &str) -> Result<Value, HttpError> {
        self.client.get(&routes::student(id)).await
    }

    pub async fn create_student(&self, data: &Value) -> Result<Value, HttpError> {
        self.client.post(routes::STUDENTS, data).await
    }

    pub async fn update_student(&self, id: &str, data: &Value) -> Result<Value, HttpError> {
        self.client.put(&routes::student(id), data).await
    }

    pub async fn delete_student(&self, id: &str) -> Result<Value, HttpError> {
        self.client.delete(&routes::student(id)).await
    }

    /// Lightweight teacher list for class assignment
    pub async fn teachers(&self) -> Result<Value, HttpError> {
        self.client.get(routes::TEACHERS).await
    }

    pub async fn enroll(&self, class_id: &str, student_id: &str) -> Result<Value, HttpError> {
        self.client
            .post(&routes::enroll(class_id), &json!({ "student_id": student_id }))
            .await
    }

    pub async fn unenroll(&self, class_id: &str, student_id: &str) -> Result<Value, HttpError> {
        self.client
            .post(&routes::unenroll(class_id), &json!({ "student_id": student_id }))
            .await
    }
}
