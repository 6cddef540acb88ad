//! Router service.
//!
//! Wraps the History API behind a signal-driven service so every
//! `window.history` mutation lives in one place. Navigation follows
//! request -> guard -> commit: the pure [`resolve`] decision runs on
//! initial load, on every `navigate`, and on popstate, so there is no
//! path into a protected view without a session.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, NavDecision, RedirectFlash, resolve};

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// replaceState variant, used for redirects so Back does not bounce.
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Signal-driven router. Authentication arrives as an injected signal so
/// the service stays decoupled from the session module.
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
    /// Redirect context waiting to be consumed by the login screen.
    flash: RwSignal<Option<RedirectFlash>>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let flash = RwSignal::new(None);

        // the route the app was opened on goes through the same guard
        let requested = AppRoute::from_path(&current_path());
        let initial = match resolve(&requested, is_authenticated.get_untracked()) {
            NavDecision::Allow => requested,
            NavDecision::Redirect {
                to,
                flash: redirect_flash,
            } => {
                replace_history_state(&to.to_path());
                flash.set(redirect_flash);
                to
            }
        };
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            is_authenticated,
            flash,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// One-shot read of the redirect context. Reading clears it, so the
    /// login screen toasts at most once per redirect.
    pub fn take_flash(&self) -> Option<RedirectFlash> {
        let flash = self.flash.get_untracked();
        if flash.is_some() {
            self.flash.set(None);
        }
        flash
    }

    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    /// Typed variant for parameterized routes.
    pub fn navigate_route(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    fn navigate_to_route(&self, target: AppRoute, use_push: bool) {
        let destination = match resolve(&target, self.is_authenticated.get_untracked()) {
            NavDecision::Allow => target,
            NavDecision::Redirect {
                to,
                flash: redirect_flash,
            } => {
                match &redirect_flash {
                    Some(_) => web_sys::console::log_1(
                        &"[Router] Access Denied. Redirecting to Login.".into(),
                    ),
                    None => web_sys::console::log_1(
                        &"[Router] Already authenticated. Redirecting to Dashboard.".into(),
                    ),
                }
                self.flash.set(redirect_flash);
                to
            }
        };

        if use_push {
            push_history_state(&destination.to_path());
        } else {
            replace_history_state(&destination.to_path());
        }
        self.set_route.set(destination);
    }

    /// Back/forward buttons re-enter through the guard as well.
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;
        let flash = self.flash;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            match resolve(&target, is_authenticated.get_untracked()) {
                NavDecision::Allow => set_route.set(target),
                NavDecision::Redirect {
                    to,
                    flash: redirect_flash,
                } => {
                    replace_history_state(&to.to_path());
                    flash.set(redirect_flash);
                    set_route.set(to);
                }
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // leak the closure to keep the listener alive for the app's lifetime
        closure.forget();
    }

    /// Reacts to session changes: a login on the login screen moves into
    /// the shell, a logout (or 401 invalidation) on a protected screen
    /// falls back to login.
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            if is_auth {
                if route.should_redirect_when_authenticated() {
                    let redirect = AppRoute::auth_success_redirect();
                    push_history_state(&redirect.to_path());
                    set_route.set(redirect);
                    web_sys::console::log_1(
                        &"[Router] Auth state changed: logged in, redirecting to dashboard.".into(),
                    );
                }
            } else if route.requires_auth() {
                let redirect = AppRoute::auth_failure_redirect();
                push_history_state(&redirect.to_path());
                set_route.set(redirect);
                web_sys::console::log_1(
                    &"[Router] Auth state changed: logged out, redirecting to login.".into(),
                );
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// Navigation as a plain callable, for event handlers.
pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI components
// ============================================================================

/// Router root. Provides the service; mount once at the top of the app.
#[component]
pub fn Router(
    /// Authentication signal injected into the guard.
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// Renders the view the matcher picks for the current route.
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// Anchor that routes through the service instead of a full page load.
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let href = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&to);
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
