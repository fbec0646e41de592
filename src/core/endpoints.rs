//! Backend API routes, relative to the configured base URL

pub mod auth {
    pub const LOGIN: &str = "/users/login/";
    pub const REGISTER: &str = "/users/register/";
    pub const ME: &str = "/users/me/";
    pub const TOKEN_REFRESH: &str = "/users/token/refresh/";
    pub const MFA_SETUP: &str = "/users/mfa/setup/";
    pub const MFA_VERIFY: &str = "/users/mfa/verify/";
    pub const MFA_DISABLE: &str = "/users/mfa/disable/";
}

pub mod users {
    pub const LIST: &str = "/users/list/";
    pub const ROLES: &str = "/users/roles/";

    pub fn update_roles(user_id: &str) -> String {
        format!("/users/{}/update-roles/", user_id)
    }
}

pub mod academics {
    pub const SUBJECTS: &str = "/classes/subjects/";
    pub const CLASSES: &str = "/classes/classes/";
    pub const STUDENTS: &str = "/classes/students/";
    pub const TEACHERS: &str = "/classes/teachers/";

    pub fn subject(id: &str) -> String {
        format!("{}{}/", SUBJECTS, id)
    }

    pub fn class(id: &str) -> String {
        format!("{}{}/", CLASSES, id)
    }

    pub fn student(id: &str) -> String {
        format!("{}{}/", STUDENTS, id)
    }

    pub fn enroll(class_id: &str) -> String {
        format!("{}{}/enroll/", CLASSES, class_id)
    }

    pub fn unenroll(class_id: &str) -> String {
        format!("{}{}/unenroll/", CLASSES, class_id)
    }
}

pub mod sessions {
    pub const BASE: &str = "/sessions/sessions/";
    pub const START: &str = "/sessions/sessions/start/";
    pub const ACTIVE: &str = "/sessions/sessions/active/";
    pub const HISTORY: &str = "/sessions/sessions/history/";

    pub fn detail(id: &str) -> String {
        format!("{}{}/", BASE, id)
    }

    pub fn end(id: &str) -> String {
        format!("{}{}/end/", BASE, id)
    }
}

pub mod attendance {
    pub const BASE: &str = "/attendance/attendance/";
    pub const MARK: &str = "/attendance/attendance/mark/";
    pub const BULK_MARK: &str = "/attendance/attendance/bulk-mark/";

    pub fn session(id: &str) -> String {
        format!("{}session/{}/", BASE, id)
    }

    pub fn student(id: &str) -> String {
        format!("{}student/{}/", BASE, id)
    }

    pub fn record(id: &str) -> String {
        format!("{}{}/", BASE, id)
    }
}

pub mod analytics {
    pub fn student(id: &str) -> String {
        format!("/analytics/student/{}/", id)
    }

    pub fn student_quick(id: &str) -> String {
        format!("/analytics/student/{}/quick/", id)
    }

    pub fn class(id: &str) -> String {
        format!("/analytics/class/{}/", id)
    }

    pub fn class_quick(id: &str) -> String {
        format!("/analytics/class/{}/quick/", id)
    }
}

pub mod reports {
    pub const LIST: &str = "/reports/";
    pub const GENERATE: &str = "/reports/generate/";

    pub fn download(id: &str) -> String {
        format!("/reports/{}/download/", id)
    }
}

pub mod notifications {
    pub const LIST: &str = "/notifications/";
    pub const TRIGGER_WEEKLY: &str = "/notifications/trigger-weekly-report/";
    pub const TRIGGER_LOW_ATTENDANCE: &str = "/notifications/trigger-low-attendance-alert/";

    pub fn detail(id: &str) -> String {
        format!("{}{}/", LIST, id)
    }
}
