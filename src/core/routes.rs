//! Application navigation: page paths, sidebar menu and the route access table

use std::sync::LazyLock;

use crate::core::access::{AccessControl, MenuEntry, RouteAccessRule};
use crate::core::roles::Role;

pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const DASHBOARD: &str = "/dashboard";
pub const PROFILE_SETTINGS: &str = "/settings/profile";
pub const MFA_SETTINGS: &str = "/settings/mfa";
pub const ADMIN_USERS: &str = "/admin/users";

const STAFF: &[Role] = &[Role::Admin, Role::Teacher];

static MENU: LazyLock<Vec<MenuEntry>> = LazyLock::new(|| {
    vec![
        MenuEntry::new(
            "Dashboard",
            DASHBOARD,
            "fi fi-ss-home",
            RouteAccessRule::any(&Role::ALL),
        ),
        MenuEntry::new(
            "Subjects",
            "/academics/subjects",
            "fi fi-ss-book-bookmark",
            RouteAccessRule::any(STAFF),
        ),
        MenuEntry::new(
            "Classes",
            "/academics/classes",
            "fi fi-ss-books",
            RouteAccessRule::any(STAFF),
        ),
        MenuEntry::new(
            "Students",
            "/academics/students",
            "fi fi-ss-users-alt",
            RouteAccessRule::any(STAFF),
        ),
        MenuEntry::new(
            "Start Session",
            "/start-session",
            "fi fi-ss-play-circle",
            RouteAccessRule::any(&[Role::Teacher]),
        ),
        MenuEntry::new(
            "Active Sessions",
            "/active-sessions",
            "fi fi-ss-signal-stream",
            RouteAccessRule::any(STAFF),
        ),
        MenuEntry::new(
            "Mark Attendance",
            "/mark-attendance",
            "fi fi-ss-checkbox",
            RouteAccessRule::any(&[Role::Teacher]),
        ),
        MenuEntry::new(
            "Session Attendance",
            "/session-attendance",
            "fi fi-ss-chart-histogram",
            RouteAccessRule::any(STAFF),
        ),
        MenuEntry::new(
            "Analytics & Reports",
            "/analytics",
            "fi fi-ss-chart-line-up",
            RouteAccessRule::any(&Role::ALL),
        ),
        MenuEntry::new(
            "Notifications",
            "/notifications",
            "fi fi-ss-envelope",
            RouteAccessRule::any(STAFF),
        ),
        MenuEntry::new(
            "Admin Panel",
            ADMIN_USERS,
            "fi fi-ss-settings",
            RouteAccessRule::any(&[Role::Admin]),
        ),
    ]
});

static ACCESS: LazyLock<AccessControl> = LazyLock::new(|| {
    AccessControl::new()
        .public(LOGIN)
        .public(REGISTER)
        .with_menu(&MENU)
        .rule("/admin/*", RouteAccessRule::any(&[Role::Admin]))
});

/// Sidebar entries in display order
pub fn menu() -> &'static [MenuEntry] {
    &MENU
}

pub fn access_control() -> &'static AccessControl {
    &ACCESS
}

/// Find the menu entry for a path, used for page titles
pub fn menu_entry(path: &str) -> Option<&'static MenuEntry> {
    menu().iter().find(|entry| entry.path == path)
}
