//! Application layouts.
//!
//! [`AuthLayout`] centers the auth card on an empty page; [`MainLayout`]
//! is the protected shell: navbar with brand, section links, theme
//! toggle and the signed-in user's menu. The theme choice is persisted
//! under its own localStorage key and re-applied on boot.

use leptos::prelude::*;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::icons::*;
use crate::config;
use crate::session::{SessionStore, clear_session, use_session};
use crate::storage::{BrowserStorage, KeyValueStore};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

const THEME_KEY: &str = "theme";
const DEFAULT_THEME: &str = "light";
const DARK_THEME: &str = "dark";

// =========================================================
// Theme
// =========================================================

fn stored_theme() -> String {
    BrowserStorage
        .get(THEME_KEY)
        .unwrap_or_else(|| DEFAULT_THEME.to_string())
}

fn apply_theme(theme: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute("data-theme", theme);
        }
    }
}

/// Re-applies the persisted theme at startup; call once from `App`.
pub fn init_theme() {
    apply_theme(&stored_theme());
}

// =========================================================
// Auth layout
// =========================================================

/// Centered card for the unauthenticated screens.
#[component]
pub fn AuthLayout(children: Children) -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="flex flex-col items-center gap-2 mb-2">
                    <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                        <Star attr:class="h-8 w-8" />
                    </div>
                    <h1 class="text-3xl font-bold">{config::app_name()}</h1>
                </div>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    {children()}
                </div>
            </div>
        </div>
    }
}

// =========================================================
// Protected shell
// =========================================================

#[component]
pub fn MainLayout(children: Children) -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let user = session.user_signal();
    let current_route = router.current_route();

    let (theme, set_theme) = signal(stored_theme());
    let toggle_theme = move |_| {
        let next = if theme.get() == DARK_THEME {
            DEFAULT_THEME
        } else {
            DARK_THEME
        };
        BrowserStorage.set(THEME_KEY, &next);
        apply_theme(next);
        set_theme.set(next.to_string());
    };

    let logout_open = RwSignal::new(false);
    let on_logout = move |_: ()| {
        clear_session(&session, &SessionStore::new(BrowserStorage));
        router.navigate("/");
    };

    let nav_class = move |active: bool| {
        if active {
            "btn btn-ghost btn-sm btn-active gap-2"
        } else {
            "btn btn-ghost btn-sm gap-2"
        }
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-md px-4">
                <div class="flex-1 gap-4">
                    <Link to="/dashboard" class="flex items-center gap-2 text-xl font-bold">
                        <Star attr:class="h-6 w-6 text-primary" />
                        {config::app_name()}
                    </Link>
                    <nav class="hidden md:flex gap-1">
                        <a
                            class=move || nav_class(current_route.get() == AppRoute::Dashboard)
                            on:click=move |_| router.navigate("/dashboard")
                        >
                            <Gauge attr:class="h-4 w-4" />
                            "Dashboard"
                        </a>
                        <a
                            class=move || {
                                nav_class(matches!(
                                    current_route.get(),
                                    AppRoute::Users | AppRoute::UserCreate | AppRoute::UserEdit { .. }
                                ))
                            }
                            on:click=move |_| router.navigate("/users")
                        >
                            <Users attr:class="h-4 w-4" />
                            "Users"
                        </a>
                    </nav>
                </div>
                <div class="flex-none gap-2">
                    <button
                        class="btn btn-ghost btn-circle"
                        aria-label="Toggle theme"
                        on:click=toggle_theme
                    >
                        {move || {
                            if theme.get() == DARK_THEME {
                                view! { <Moon attr:class="h-5 w-5" /> }.into_any()
                            } else {
                                view! { <Sun attr:class="h-5 w-5" /> }.into_any()
                            }
                        }}
                    </button>
                    <div class="dropdown dropdown-end">
                        <div tabindex="0" role="button" class="btn btn-ghost gap-2">
                            <div class="avatar placeholder">
                                <div class="bg-primary text-primary-content w-8 rounded-full">
                                    <span class="text-xs">
                                        {move || initials(&user.get().map(|u| u.name).unwrap_or_default())}
                                    </span>
                                </div>
                            </div>
                            <span class="hidden md:inline">
                                {move || user.get().map(|u| u.name).unwrap_or_default()}
                            </span>
                            <ChevronsUpDown attr:class="h-4 w-4 opacity-50" />
                        </div>
                        <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-100 rounded-box w-56">
                            <li class="menu-title truncate">
                                {move || user.get().map(|u| u.email).unwrap_or_default()}
                            </li>
                            <li>
                                <a on:click=move |_| router.navigate("/profile")>
                                    <UserPen attr:class="h-4 w-4" />
                                    "Update Profile"
                                </a>
                            </li>
                            <li>
                                <a class="text-error" on:click=move |_| logout_open.set(true)>
                                    <LogOut attr:class="h-4 w-4" />
                                    "Log out"
                                </a>
                            </li>
                        </ul>
                    </div>
                </div>
            </div>

            <main class="max-w-7xl mx-auto p-4 md:p-8">{children()}</main>

            <ConfirmDialog
                title="Are you sure you want to Log out?"
                description="This action cannot be undone."
                open=logout_open
                on_confirm=on_logout
            />
        </div>
    }
}

/// Up to two initials for the avatar placeholder.
fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::initials;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("grace"), "G");
        assert_eq!(initials("Jean Luc Picard"), "JL");
        assert_eq!(initials(""), "");
    }
}
