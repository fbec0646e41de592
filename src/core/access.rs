//! Role-based access control for pages and menu entries
//!
//! Denial is a value ([`AccessDecision::Denied`]) rather than an error. The
//! `Pending` outcome exists so callers can show a spinner while the stored
//! session is still being resolved instead of flashing "access denied".

use std::fmt;

use crate::core::auth::AuthState;
use crate::core::roles::{Role, RoleSet};
use crate::core::session::UserProfile;

/// How a rule's role set is compared with the user's roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// At least one allowed role
    #[default]
    Any,
    /// Every allowed role
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAccessRule {
    pub allowed_roles: RoleSet,
    pub policy: MatchPolicy,
}

impl RouteAccessRule {
    pub fn any(roles: &[Role]) -> Self {
        Self {
            allowed_roles: RoleSet::from(roles),
            policy: MatchPolicy::Any,
        }
    }

    pub fn all(roles: &[Role]) -> Self {
        Self {
            allowed_roles: RoleSet::from(roles),
            policy: MatchPolicy::All,
        }
    }

    pub fn permits(&self, user: &UserProfile) -> bool {
        match self.policy {
            MatchPolicy::Any => user.roles.intersects(&self.allowed_roles),
            MatchPolicy::All => user.roles.is_superset(&self.allowed_roles),
        }
    }
}

/// Outcome of an access check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Session not resolved yet; render a loading state
    Pending,
    RedirectToLogin,
    Granted,
    Denied,
}

impl AccessDecision {
    pub fn is_granted(self) -> bool {
        self == AccessDecision::Granted
    }
}

/// Decide access for the current auth state.
///
/// `None` as rule means any authenticated user may enter.
pub fn check_access(state: &AuthState, rule: Option<&RouteAccessRule>) -> AccessDecision {
    if state.is_resolving() {
        return AccessDecision::Pending;
    }
    match (state.user(), rule) {
        (None, _) => AccessDecision::RedirectToLogin,
        (Some(user), Some(rule)) if !rule.permits(user) => AccessDecision::Denied,
        (Some(_), _) => AccessDecision::Granted,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param,
}

/// Route pattern such as `/academics/classes/:id` or `/reports/*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
    wildcard: bool,
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty())
}

impl PathPattern {
    pub fn new(pattern: &str) -> Self {
        let mut segments = Vec::new();
        let mut wildcard = false;
        for segment in path_segments(pattern) {
            if segment == "*" {
                wildcard = true;
                break;
            }
            segments.push(match segment.strip_prefix(':') {
                Some(_) => Segment::Param,
                None => Segment::Literal(segment.to_string()),
            });
        }
        Self {
            raw: pattern.to_string(),
            segments,
            wildcard,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path_segments(path).collect();
        let length_ok = if self.wildcard {
            parts.len() >= self.segments.len()
        } else {
            parts.len() == self.segments.len()
        };
        length_ok
            && self
                .segments
                .iter()
                .zip(&parts)
                .all(|(segment, part)| match segment {
                    Segment::Literal(literal) => literal.as_str() == *part,
                    Segment::Param => true,
                })
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Navigation entry shown in the sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
    pub rule: RouteAccessRule,
}

impl MenuEntry {
    pub fn new(
        label: &'static str,
        path: &'static str,
        icon: &'static str,
        rule: RouteAccessRule,
    ) -> Self {
        Self {
            label,
            path,
            icon,
            rule,
        }
    }
}

/// Entries the user may see, in configuration order
pub fn visible_entries<'a>(
    entries: &'a [MenuEntry],
    user: Option<&UserProfile>,
) -> Vec<&'a MenuEntry> {
    let Some(user) = user else {
        return Vec::new();
    };
    entries.iter().filter(|entry| entry.rule.permits(user)).collect()
}

/// Route table: public paths plus per-route rules
#[derive(Debug, Clone, Default)]
pub struct AccessControl {
    public: Vec<PathPattern>,
    rules: Vec<(PathPattern, RouteAccessRule)>,
}

impl AccessControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths reachable without logging in
    pub fn public(mut self, pattern: &str) -> Self {
        self.public.push(PathPattern::new(pattern));
        self
    }

    /// Rules are tried in insertion order; the first match wins
    pub fn rule(mut self, pattern: &str, rule: RouteAccessRule) -> Self {
        self.rules.push((PathPattern::new(pattern), rule));
        self
    }

    /// Add one rule per menu entry
    pub fn with_menu(self, entries: &[MenuEntry]) -> Self {
        entries
            .iter()
            .fold(self, |acc, entry| acc.rule(entry.path, entry.rule.clone()))
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public.iter().any(|pattern| pattern.matches(path))
    }

    pub fn rule_for(&self, path: &str) -> Option<&RouteAccessRule> {
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.matches(path))
            .map(|(_, rule)| rule)
    }

    pub fn decide(&self, path: &str, state: &AuthState) -> AccessDecision {
        if self.is_public(path) {
            return AccessDecision::Granted;
        }
        check_access(state, self.rule_for(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::test_profile;

    fn authenticated(roles: &[Role]) -> AuthState {
        AuthState::Authenticated(test_profile("u1", roles))
    }

    #[test]
    fn test_any_policy() {
        let rule = RouteAccessRule::any(&[Role::Admin, Role::Teacher]);

        assert!(rule.permits(&test_profile("a", &[Role::Teacher])));
        assert!(rule.permits(&test_profile("b", &[Role::Admin, Role::Student])));
        assert!(!rule.permits(&test_profile("c", &[Role::Student])));
        assert!(!rule.permits(&test_profile("d", &[])));
    }

    #[test]
    fn test_all_policy() {
        let rule = RouteAccessRule::all(&[Role::Admin, Role::Teacher]);

        assert!(rule.permits(&test_profile("a", &[Role::Admin, Role::Teacher])));
        assert!(rule.permits(&test_profile("b", &Role::ALL)));
        assert!(!rule.permits(&test_profile("c", &[Role::Admin])));
    }

    #[test]
    fn test_admin_only_rule_denies_teacher_student() {
        let rule = RouteAccessRule::any(&[Role::Admin]);

        assert_eq!(
            check_access(&authenticated(&[Role::Teacher, Role::Student]), Some(&rule)),
            AccessDecision::Denied
        );
        assert_eq!(
            check_access(&authenticated(&[Role::Admin]), Some(&rule)),
            AccessDecision::Granted
        );
    }

    #[test]
    fn test_unresolved_session_is_pending() {
        let rule = RouteAccessRule::any(&[Role::Admin]);

        assert_eq!(
            check_access(&AuthState::Loading, Some(&rule)),
            AccessDecision::Pending
        );
        assert_eq!(
            check_access(&AuthState::Authenticating, None),
            AccessDecision::Pending
        );
    }

    #[test]
    fn test_no_user_redirects_to_login() {
        let rule = RouteAccessRule::any(&Role::ALL);

        assert_eq!(
            check_access(&AuthState::Unauthenticated, Some(&rule)),
            AccessDecision::RedirectToLogin
        );
        assert_eq!(
            check_access(
                &AuthState::MfaPending {
                    email: "t@x.com".to_string()
                },
                None
            ),
            AccessDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_visible_entries_keep_configuration_order() {
        let entries = vec![
            MenuEntry::new("Zeta", "/zeta", "", RouteAccessRule::any(&[Role::Teacher])),
            MenuEntry::new("Alpha", "/alpha", "", RouteAccessRule::any(&[Role::Admin])),
            MenuEntry::new("Mid", "/mid", "", RouteAccessRule::any(&Role::ALL)),
            MenuEntry::new("Beta", "/beta", "", RouteAccessRule::any(&[Role::Teacher])),
        ];
        let teacher = test_profile("t", &[Role::Teacher]);

        let labels: Vec<&str> = visible_entries(&entries, Some(&teacher))
            .iter()
            .map(|entry| entry.label)
            .collect();

        assert_eq!(labels, ["Zeta", "Mid", "Beta"]);
        assert!(visible_entries(&entries, None).is_empty());
    }

    #[test]
    fn test_path_pattern_matching() {
        let literal = PathPattern::new("/academics/classes");
        assert!(literal.matches("/academics/classes"));
        assert!(literal.matches("/academics/classes/"));
        assert!(literal.matches("/academics/classes?page=2"));
        assert!(!literal.matches("/academics/classes/42"));
        assert!(!literal.matches("/academics"));

        let param = PathPattern::new("/analytics/student/:id");
        assert!(param.matches("/analytics/student/17"));
        assert!(!param.matches("/analytics/student"));
        assert!(!param.matches("/analytics/class/17"));

        let wildcard = PathPattern::new("/admin/*");
        assert!(wildcard.matches("/admin"));
        assert!(wildcard.matches("/admin/users/3/roles"));
        assert!(!wildcard.matches("/administrator"));

        assert!(PathPattern::new("/").matches("/"));
        assert!(!PathPattern::new("/").matches("/dashboard"));
    }

    #[test]
    fn test_access_control_table() {
        let control = AccessControl::new()
            .public("/login")
            .rule("/admin/*", RouteAccessRule::any(&[Role::Admin]))
            .rule(
                "/academics/:section",
                RouteAccessRule::any(&[Role::Admin, Role::Teacher]),
            );
        let student = authenticated(&[Role::Student]);

        assert_eq!(
            control.decide("/login", &AuthState::Unauthenticated),
            AccessDecision::Granted
        );
        assert_eq!(
            control.decide("/login", &AuthState::Loading),
            AccessDecision::Granted
        );
        assert_eq!(
            control.decide("/admin/users", &student),
            AccessDecision::Denied
        );
        assert_eq!(
            control.decide("/academics/subjects", &student),
            AccessDecision::Denied
        );
        assert_eq!(
            control.decide("/academics/subjects", &authenticated(&[Role::Teacher])),
            AccessDecision::Granted
        );
        // unlisted routes only need a logged-in user
        assert_eq!(
            control.decide("/settings/profile", &student),
            AccessDecision::Granted
        );
        assert_eq!(
            control.decide("/settings/profile", &AuthState::Unauthenticated),
            AccessDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let control = AccessControl::new()
            .rule("/reports/public", RouteAccessRule::any(&Role::ALL))
            .rule("/reports/*", RouteAccessRule::any(&[Role::Admin]));

        assert_eq!(
            control.rule_for("/reports/public"),
            Some(&RouteAccessRule::any(&Role::ALL))
        );
        assert_eq!(
            control.rule_for("/reports/export"),
            Some(&RouteAccessRule::any(&[Role::Admin]))
        );
        assert_eq!(control.rule_for("/dashboard"), None);
    }
}
