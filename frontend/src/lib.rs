//! Starboard admin console.
//!
//! Context-driven architecture: the contexts created once in [`App`]
//! (session, toasts, router) flow down through `use_*` accessors, so
//! screens never touch wiring.
//! - `web::route` / `web::router`: typed routes and the history-backed
//!   router with its auth guard
//! - `session`: the persisted auth session
//! - `api`: REST client with bearer injection and error normalization
//! - `list`: the users table state machine
//! - `components`: UI layer

mod api;
mod components {
    mod confirm_dialog;
    pub mod dashboard;
    pub mod forgot_password;
    mod icons;
    pub mod layout;
    pub mod login;
    mod password_dialog;
    pub mod profile;
    pub mod register;
    pub mod reset_password;
    pub mod toast;
    pub mod user_form;
    pub mod user_list;
}
mod config;
mod error;
mod http;
mod list;
mod session;
mod storage;
mod validate;

pub(crate) mod web {
    pub mod download;
    pub mod route;
    pub mod router;
}

use leptos::prelude::*;

use crate::components::dashboard::DashboardPage;
use crate::components::forgot_password::ForgotPasswordPage;
use crate::components::layout::{init_theme, AuthLayout, MainLayout};
use crate::components::login::LoginPage;
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::components::reset_password::ResetPasswordPage;
use crate::components::toast::{provide_toasts, Toaster};
use crate::components::user_form::UserFormPage;
use crate::components::user_list::UserListPage;
use crate::session::{init_session, SessionContext};
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// Maps a route to its screen. Auth screens share [`AuthLayout`], the
/// protected area shares [`MainLayout`].
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! {
            <AuthLayout>
                <LoginPage />
            </AuthLayout>
        }
        .into_any(),
        AppRoute::Register => view! {
            <AuthLayout>
                <RegisterPage />
            </AuthLayout>
        }
        .into_any(),
        AppRoute::ForgotPassword => view! {
            <AuthLayout>
                <ForgotPasswordPage />
            </AuthLayout>
        }
        .into_any(),
        AppRoute::ResetPassword { token } => view! {
            <AuthLayout>
                <ResetPasswordPage token=token />
            </AuthLayout>
        }
        .into_any(),
        AppRoute::Dashboard => view! {
            <MainLayout>
                <DashboardPage />
            </MainLayout>
        }
        .into_any(),
        AppRoute::Users => view! {
            <MainLayout>
                <UserListPage />
            </MainLayout>
        }
        .into_any(),
        AppRoute::UserCreate => view! {
            <MainLayout>
                <UserFormPage />
            </MainLayout>
        }
        .into_any(),
        AppRoute::UserEdit { id } => view! {
            <MainLayout>
                <UserFormPage id=id />
            </MainLayout>
        }
        .into_any(),
        AppRoute::Profile => view! {
            <MainLayout>
                <ProfilePage />
            </MainLayout>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Session first: the router reads the auth state when it is
    // constructed, so the persisted session must already be loaded.
    let session_ctx = SessionContext::new();
    provide_context(session_ctx);
    init_session(&session_ctx);

    init_theme();
    provide_toasts();

    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(config::app_name());
    }

    let is_authenticated = session_ctx.is_authenticated_signal();

    view! {
        <Toaster />
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
