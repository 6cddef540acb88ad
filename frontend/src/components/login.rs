//! Login screen, the unauthenticated entry point.

use leptos::prelude::*;
use leptos::task::spawn_local;
use starboard_shared::LoginRequest;

use crate::api::use_api;
use crate::components::toast::use_toast;
use crate::config;
use crate::session::{establish_session, use_session};
use crate::validate::{email_format, first, required};
use crate::web::router::{Link, use_router};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let toast = use_toast();
    let api = use_api();

    // A guarded redirect landed us here; explain it once.
    if let Some(flash) = router.take_flash() {
        if flash.unauthorized {
            toast.error("You are not authorized.");
        }
    }

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (email_error, set_email_error) = signal(Option::<&'static str>::None);
    let (password_error, set_password_error) = signal(Option::<&'static str>::None);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get() {
            return;
        }

        let email_violation = first([
            required(&email.get(), "Email is required"),
            email_format(&email.get(), "Invalid email address"),
        ]);
        let password_violation = required(&password.get(), "Password is required");
        set_email_error.set(email_violation);
        set_password_error.set(password_violation);
        if email_violation.is_some() || password_violation.is_some() {
            return;
        }

        set_is_submitting.set(true);
        let api = api.clone();
        spawn_local(async move {
            let request = LoginRequest {
                email: email.get_untracked(),
                password: password.get_untracked(),
            };
            match api.login(&request).await {
                Ok(response) => {
                    establish_session(&session, api.session(), response);
                    router.navigate("/dashboard");
                    toast.success("Login successful!");
                }
                Err(e) => toast.error(e.message()),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <form class="card-body" on:submit=on_submit>
            <div class="text-center mb-2">
                <h2 class="text-2xl font-bold">"Welcome back"</h2>
                <p class="text-base-content/70">
                    {format!("Login to your {} account", config::app_name())}
                </p>
            </div>

            <div class="form-control">
                <label class="label" for="email">
                    <span class="label-text">"Email"</span>
                </label>
                <input
                    id="email"
                    type="email"
                    placeholder="m@example.com"
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    prop:value=email
                    class="input input-bordered"
                />
                {move || email_error.get().map(|msg| view! { <span class="text-error text-sm">{msg}</span> })}
            </div>

            <div class="form-control">
                <label class="label" for="password">
                    <span class="label-text">"Password"</span>
                    <Link to="/forgot-password" class="label-text-alt link link-hover">
                        "Forgot your password?"
                    </Link>
                </label>
                <input
                    id="password"
                    type="password"
                    placeholder="••••••••"
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    prop:value=password
                    class="input input-bordered"
                />
                {move || password_error.get().map(|msg| view! { <span class="text-error text-sm">{msg}</span> })}
            </div>

            <div class="form-control mt-4">
                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                    {move || {
                        if is_submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "Login..." }
                                .into_any()
                        } else {
                            "Login".into_any()
                        }
                    }}
                </button>
            </div>

            <Show when=|| config::allow_registration()>
                <div class="text-center text-sm mt-2">
                    "Don't have an account? "
                    <Link to="/register" class="link link-primary">
                        "Register"
                    </Link>
                </div>
            </Show>
        </form>
    }
}
