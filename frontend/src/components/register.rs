//! Self-registration screen.
//!
//! Always routable; the login screen only links here when registration
//! is enabled in the build configuration.

use leptos::prelude::*;
use leptos::task::spawn_local;
use starboard_shared::RegisterRequest;

use crate::api::use_api;
use crate::components::toast::use_toast;
use crate::config;
use crate::validate::{email_format, first, min_len, must_match, required};
use crate::web::router::{Link, use_router};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let router = use_router();
    let toast = use_toast();
    let api = use_api();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (name_error, set_name_error) = signal(Option::<&'static str>::None);
    let (email_error, set_email_error) = signal(Option::<&'static str>::None);
    let (password_error, set_password_error) = signal(Option::<&'static str>::None);
    let (confirm_error, set_confirm_error) = signal(Option::<&'static str>::None);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get() {
            return;
        }

        let name_violation = required(&name.get(), "Name is required");
        let email_violation = first([
            required(&email.get(), "Email is required"),
            email_format(&email.get(), "Invalid email address"),
        ]);
        let password_violation = first([
            required(&password.get(), "Password is required"),
            min_len(&password.get(), 6, "Password must be at least 6 characters long"),
        ]);
        let confirm_violation = first([
            required(&confirm.get(), "Confirm Password is required"),
            must_match(&confirm.get(), &password.get(), "Passwords must match"),
        ]);
        set_name_error.set(name_violation);
        set_email_error.set(email_violation);
        set_password_error.set(password_violation);
        set_confirm_error.set(confirm_violation);
        if [name_violation, email_violation, password_violation, confirm_violation]
            .iter()
            .any(Option::is_some)
        {
            return;
        }

        set_is_submitting.set(true);
        let api = api.clone();
        spawn_local(async move {
            let request = RegisterRequest {
                name: name.get_untracked(),
                email: email.get_untracked(),
                password: password.get_untracked(),
                confirm_password: confirm.get_untracked(),
            };
            match api.register(&request).await {
                Ok(()) => {
                    toast.success("Registration successful! Please log in.");
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
                <h2 class="text-2xl font-bold">"Create an Account"</h2>
                <p class="text-base-content/70">
                    {format!("Register for your {} account", config::app_name())}
                </p>
            </div>

            <div class="form-control">
                <label class="label" for="name">
                    <span class="label-text">"Name"</span>
                </label>
                <input
                    id="name"
                    type="text"
                    placeholder="John Doe"
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    prop:value=name
                    class="input input-bordered"
                />
                {move || name_error.get().map(|msg| view! { <span class="text-error text-sm">{msg}</span> })}
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

            <div class="form-control">
                <label class="label" for="confirm-password">
                    <span class="label-text">"Confirm Password"</span>
                </label>
                <input
                    id="confirm-password"
                    type="password"
                    placeholder="••••••••"
                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                    prop:value=confirm
                    class="input input-bordered"
                />
                {move || confirm_error.get().map(|msg| view! { <span class="text-error text-sm">{msg}</span> })}
            </div>

            <div class="form-control mt-4">
                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                    {move || {
                        if is_submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "Registering..." }
                                .into_any()
                        } else {
                            "Register".into_any()
                        }
                    }}
                </button>
            </div>

            <div class="text-center text-sm mt-2">
                "Already have an account? "
                <Link to="/" class="link link-primary">
                    "Login"
                </Link>
            </div>
        </form>
    }
}
