//! Reset-password screen, reached from the emailed link.

use leptos::prelude::*;
use leptos::task::spawn_local;
use starboard_shared::ResetPasswordRequest;

use crate::api::use_api;
use crate::components::toast::use_toast;
use crate::validate::{first, min_len, must_match, required};
use crate::web::router::use_router;

#[component]
pub fn ResetPasswordPage(
    /// Reset token from the route path.
    token: String,
) -> impl IntoView {
    let router = use_router();
    let toast = use_toast();
    let api = use_api();

    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (password_error, set_password_error) = signal(Option::<&'static str>::None);
    let (confirm_error, set_confirm_error) = signal(Option::<&'static str>::None);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get() {
            return;
        }

        let password_violation = first([
            required(&password.get(), "Password is required"),
            min_len(&password.get(), 6, "Password must be at least 6 characters long"),
        ]);
        let confirm_violation = first([
            required(&confirm.get(), "Confirm Password is required"),
            must_match(&confirm.get(), &password.get(), "Passwords must match"),
        ]);
        set_password_error.set(password_violation);
        set_confirm_error.set(confirm_violation);
        if password_violation.is_some() || confirm_violation.is_some() {
            return;
        }

        set_is_submitting.set(true);
        let api = api.clone();
        let token = token.clone();
        spawn_local(async move {
            let request = ResetPasswordRequest {
                password: password.get_untracked(),
                token,
            };
            match api.reset_password(&request).await {
                Ok(()) => {
                    toast.success("Password reset successful!");
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
                <h2 class="text-2xl font-bold">"Reset Password"</h2>
                <p class="text-base-content/70">"Enter your new password to reset your account"</p>
            </div>

            <div class="form-control">
                <label class="label" for="password">
                    <span class="label-text">"New Password"</span>
                </label>
                <input
                    id="password"
                    type="password"
                    placeholder="Enter new password"
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
                    placeholder="Confirm new password"
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
                            view! { <span class="loading loading-spinner"></span> "Resetting..." }
                                .into_any()
                        } else {
                            "Reset Password".into_any()
                        }
                    }}
                </button>
            </div>
        </form>
    }
}
