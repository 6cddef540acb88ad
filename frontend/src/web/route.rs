//! Route definitions.
//!
//! Pure domain layer: no DOM, no web_sys. Declares every route, its
//! path mapping, and the guard decision the router service applies.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Login screen, the unauthenticated entry point.
    #[default]
    Login,
    Register,
    ForgotPassword,
    /// Landing page of the reset link; the token rides in the path.
    ResetPassword {
        token: String,
    },
    Dashboard,
    Users,
    UserCreate,
    UserEdit {
        id: u64,
    },
    Profile,
    NotFound,
}

impl AppRoute {
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };

        match path {
            "/" | "/login" => Self::Login,
            "/register" => Self::Register,
            "/forgot-password" => Self::ForgotPassword,
            "/dashboard" => Self::Dashboard,
            "/users" => Self::Users,
            "/users/new" => Self::UserCreate,
            "/profile" => Self::Profile,
            _ => {
                let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
                match segments.as_slice() {
                    ["reset-password", token] if !token.is_empty() => Self::ResetPassword {
                        token: (*token).to_string(),
                    },
                    ["users", id, "edit"] => match id.parse() {
                        Ok(id) => Self::UserEdit { id },
                        Err(_) => Self::NotFound,
                    },
                    _ => Self::NotFound,
                }
            }
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/".to_string(),
            Self::Register => "/register".to_string(),
            Self::ForgotPassword => "/forgot-password".to_string(),
            Self::ResetPassword { token } => format!("/reset-password/{}", token),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Users => "/users".to_string(),
            Self::UserCreate => "/users/new".to_string(),
            Self::UserEdit { id } => format!("/users/{}/edit", id),
            Self::Profile => "/profile".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// The guard predicate: everything behind the shell needs a session.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Users | Self::UserCreate | Self::UserEdit { .. } | Self::Profile
        )
    }

    /// Routes an authenticated user should be bounced away from.
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// Guard decision
// =========================================================

/// One-shot state carried to the login screen by a guarded redirect, so
/// it can explain why the user landed there and return them afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectFlash {
    pub unauthorized: bool,
    pub from: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavDecision {
    Allow,
    Redirect {
        to: AppRoute,
        flash: Option<RedirectFlash>,
    },
}

/// The route guard, applied by the router service on initial load, every
/// `navigate`, and popstate. Token presence is the only input; no server
/// round-trip is involved.
pub fn resolve(target: &AppRoute, is_authenticated: bool) -> NavDecision {
    if target.requires_auth() && !is_authenticated {
        return NavDecision::Redirect {
            to: AppRoute::auth_failure_redirect(),
            flash: Some(RedirectFlash {
                unauthorized: true,
                from: target.to_path(),
            }),
        };
    }
    if target.should_redirect_when_authenticated() && is_authenticated {
        return NavDecision::Redirect {
            to: AppRoute::auth_success_redirect(),
            flash: None,
        };
    }
    NavDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trips() {
        let routes = [
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::ForgotPassword,
            AppRoute::ResetPassword {
                token: "abc123".to_string(),
            },
            AppRoute::Dashboard,
            AppRoute::Users,
            AppRoute::UserCreate,
            AppRoute::UserEdit { id: 42 },
            AppRoute::Profile,
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn test_login_aliases_and_trailing_slash() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/users/"), AppRoute::Users);
        assert_eq!(AppRoute::from_path(""), AppRoute::Login);
    }

    #[test]
    fn test_unknown_paths_fall_through_to_not_found() {
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/users/abc/edit"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/reset-password"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/users/7/rename"), AppRoute::NotFound);
    }

    #[test]
    fn test_auth_requirements() {
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(AppRoute::Users.requires_auth());
        assert!(AppRoute::UserCreate.requires_auth());
        assert!(AppRoute::UserEdit { id: 1 }.requires_auth());
        assert!(AppRoute::Profile.requires_auth());

        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::Register.requires_auth());
        assert!(!AppRoute::ForgotPassword.requires_auth());
        assert!(
            !AppRoute::ResetPassword {
                token: "t".to_string()
            }
            .requires_auth()
        );
        assert!(!AppRoute::NotFound.requires_auth());
    }

    #[test]
    fn test_guard_redirects_anonymous_user_with_flash() {
        let decision = resolve(&AppRoute::Users, false);
        assert_eq!(
            decision,
            NavDecision::Redirect {
                to: AppRoute::Login,
                flash: Some(RedirectFlash {
                    unauthorized: true,
                    from: "/users".to_string(),
                }),
            }
        );
    }

    #[test]
    fn test_guard_bounces_authenticated_user_off_login() {
        let decision = resolve(&AppRoute::Login, true);
        assert_eq!(
            decision,
            NavDecision::Redirect {
                to: AppRoute::Dashboard,
                flash: None,
            }
        );
    }

    #[test]
    fn test_guard_allows_everything_else() {
        assert_eq!(resolve(&AppRoute::Users, true), NavDecision::Allow);
        assert_eq!(resolve(&AppRoute::Login, false), NavDecision::Allow);
        assert_eq!(resolve(&AppRoute::Register, true), NavDecision::Allow);
        assert_eq!(resolve(&AppRoute::NotFound, false), NavDecision::Allow);
    }
}
