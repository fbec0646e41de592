//! Leptos components

pub mod auth;
pub mod common;
pub mod icon;
pub mod layout;
pub mod pages;
pub mod sidebar;

pub use icon::{Icon, icons};
pub use layout::{AuthLayout, DashboardLayout, Navbar};
pub use sidebar::Sidebar;
