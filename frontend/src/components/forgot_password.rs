//! Forgot-password screen.
//!
//! Sends the reset email; the payload carries the reset page URL built
//! from this deployment's origin so the emailed link comes back here.

use leptos::prelude::*;
use leptos::task::spawn_local;
use starboard_shared::ForgotPasswordRequest;

use crate::api::use_api;
use crate::components::toast::use_toast;
use crate::config;
use crate::validate::{email_format, first, required};
use crate::web::router::{Link, use_router};

fn reset_url() -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    format!("{}/reset-password", origin)
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let router = use_router();
    let toast = use_toast();
    let api = use_api();

    let (email, set_email) = signal(String::new());
    let (email_error, set_email_error) = signal(Option::<&'static str>::None);
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
        set_email_error.set(email_violation);
        if email_violation.is_some() {
            return;
        }

        set_is_submitting.set(true);
        let api = api.clone();
        spawn_local(async move {
            let request = ForgotPasswordRequest {
                email: email.get_untracked(),
                reset_url: reset_url(),
            };
            match api.forgot_password(&request).await {
                Ok(()) => {
                    toast.success("Password reset email sent!");
                    router.navigate("/");
                }
                Err(e) => toast.error(e.message()),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <form class="card-body" on:submit=on_submit>
            <div class="text-center mb-2">
                <h2 class="text-2xl font-bold">"Forgot Password"</h2>
                <p class="text-base-content/70">
                    {format!("Enter your email to reset your {} account password", config::app_name())}
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

            <div class="form-control mt-4">
                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                    {move || {
                        if is_submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "Sending..." }
                                .into_any()
                        } else {
                            "Send Reset Link".into_any()
                        }
                    }}
                </button>
            </div>

            <div class="text-center text-sm mt-2">
                "Remembered your password? "
                <Link to="/" class="link link-primary">
                    "Login"
                </Link>
            </div>
        </form>
    }
}
