//! Typed wrappers over the backend's feature endpoints
//!
//! Each service borrows an [`ApiClient`], so every call goes through the
//! same bearer-injection and refresh-on-401 pipeline.

pub mod academics;
pub mod analytics;
pub mod attendance;
pub mod notifications;
pub mod reports;
pub mod sessions;
pub mod users;

pub use academics::AcademicsService;
pub use analytics::AnalyticsService;
pub use attendance::{AttendanceMark, AttendanceService, AttendanceStatus};
pub use notifications::{NotificationFilters, NotificationsService};
pub use reports::{ReportRequest, ReportScope, ReportsService};
pub use sessions::SessionsService;
pub use users::{RoleRecord, UsersService};

use crate::core::http::{ApiClient, RequestOptions};

/// Query string built from `(key, value)` filter pairs
pub type Filters<'f> = &'f [(&'f str, &'f str)];

fn filter_options(filters: Filters<'_>) -> RequestOptions {
    filters
        .iter()
        .fold(RequestOptions::default(), |options, (key, value)| {
            options.query(*key, value)
        })
}

/// Every feature service bound to one client
#[derive(Clone, Copy)]
pub struct Services<'a> {
    client: &'a ApiClient,
}

impl<'a> Services<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn users(self) -> UsersService<'a> {
        UsersService::new(self.client)
    }

    pub fn academics(self) -> AcademicsService<'a> {
        AcademicsService::new(self.client)
    }

    pub fn sessions(self) -> SessionsService<'a> {
        SessionsService::new(self.client)
    }

    pub fn attendance(self) -> AttendanceService<'a> {
        AttendanceService::new(self.client)
    }

    pub fn analytics(self) -> AnalyticsService<'a> {
        AnalyticsService::new(self.client)
    }

    pub fn reports(self) -> ReportsService<'a> {
        ReportsService::new(self.client)
    }

    pub fn notifications(self) -> NotificationsService<'a> {
        NotificationsService::new(self.client)
    }
}
