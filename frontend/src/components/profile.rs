//! Self-service profile screen: one card to edit the display name and
//! email, one to change the password.

use leptos::prelude::*;
use leptos::task::spawn_local;
use starboard_shared::{ChangePasswordRequest, UpdateProfileRequest};

use crate::api::use_api;
use crate::components::toast::use_toast;
use crate::session::{update_session_user, use_session};
use crate::validate::{email_format, first, min_len, must_match, required};

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <div class="max-w-3xl mx-auto space-y-8">
            <h1 class="text-2xl font-bold">"Profile Settings"</h1>
            <UpdateProfile />
            <ChangePassword />
        </div>
    }
}

#[component]
fn UpdateProfile() -> impl IntoView {
    let session = use_session();
    let toast = use_toast();
    let api = use_api();

    // Prefill from the cached session user; the id rides along for the
    // update request.
    let cached = session.state.get_untracked().user;
    let user_id = cached.as_ref().map(|u| u.id);

    let (name, set_name) = signal(cached.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let (email, set_email) = signal(cached.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let (name_error, set_name_error) = signal(Option::<&'static str>::None);
    let (email_error, set_email_error) = signal(Option::<&'static str>::None);
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
        set_name_error.set(name_violation);
        set_email_error.set(email_violation);
        if name_violation.is_some() || email_violation.is_some() {
            return;
        }

        let Some(id) = user_id else {
            toast.error("User ID not found");
            return;
        };

        set_is_submitting.set(true);
        let api = api.clone();
        spawn_local(async move {
            let request = UpdateProfileRequest {
                id,
                name: name.get_untracked(),
                email: email.get_untracked(),
            };
            match api.update_profile(&request).await {
                Ok(()) => {
                    if let Some(mut user) = session.state.get_untracked().user {
                        user.name = request.name.clone();
                        user.email = request.email.clone();
                        update_session_user(&session, api.session(), user);
                    }
                    toast.success("Profile updated successfully");
                }
                Err(e) => toast.error(e.message()),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">"Update Profile"</h2>
                <p class="text-base-content/70 text-sm">
                    "Update your personal details and contact information."
                </p>

                <form class="space-y-4 mt-2" on:submit=on_submit>
                    <div class="form-control">
                        <label class="label" for="name">
                            <span class="label-text">"Full Name"</span>
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
                            <span class="label-text">"Email Address"</span>
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

                    <button class="btn btn-primary" disabled=move || is_submitting.get()>
                        {move || {
                            if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }
                                    .into_any()
                            } else {
                                "Save Changes".into_any()
                            }
                        }}
                    </button>
                </form>

                <p class="text-sm text-base-content/50 mt-2">
                    "Make sure your information is accurate before saving."
                </p>
            </div>
        </div>
    }
}

#[component]
fn ChangePassword() -> impl IntoView {
    let toast = use_toast();
    let api = use_api();

    let (current, set_current) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (current_error, set_current_error) = signal(Option::<&'static str>::None);
    let (new_error, set_new_error) = signal(Option::<&'static str>::None);
    let (confirm_error, set_confirm_error) = signal(Option::<&'static str>::None);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get() {
            return;
        }

        let current_violation = required(&current.get(), "Current password is required");
        let new_violation = first([
            required(&new_password.get(), "New password is required"),
            min_len(&new_password.get(), 6, "New password must be at least 6 characters long"),
        ]);
        let confirm_violation = first([
            required(&confirm.get(), "Confirm password is required"),
            must_match(&confirm.get(), &new_password.get(), "Passwords must match"),
        ]);
        set_current_error.set(current_violation);
        set_new_error.set(new_violation);
        set_confirm_error.set(confirm_violation);
        if [current_violation, new_violation, confirm_violation]
            .iter()
            .any(Option::is_some)
        {
            return;
        }

        set_is_submitting.set(true);
        let api = api.clone();
        spawn_local(async move {
            let request = ChangePasswordRequest {
                current_password: current.get_untracked(),
                new_password: new_password.get_untracked(),
            };
            match api.change_password(&request).await {
                Ok(()) => toast.success("Password changed successfully"),
                Err(e) => toast.error(e.message()),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">"Change Password"</h2>
                <p class="text-base-content/70 text-sm">"Update your account password securely."</p>

                <form class="space-y-4 mt-2" on:submit=on_submit>
                    <div class="form-control">
                        <label class="label" for="current-password">
                            <span class="label-text">"Current Password"</span>
                        </label>
                        <input
                            id="current-password"
                            type="password"
                            placeholder="Enter your current password"
                            on:input=move |ev| set_current.set(event_target_value(&ev))
                            prop:value=current
                            class="input input-bordered"
                        />
                        {move || current_error.get().map(|msg| view! { <span class="text-error text-sm">{msg}</span> })}
                    </div>

                    <div class="form-control">
                        <label class="label" for="new-password">
                            <span class="label-text">"New Password"</span>
                        </label>
                        <input
                            id="new-password"
                            type="password"
                            placeholder="Enter your new password"
                            on:input=move |ev| set_new_password.set(event_target_value(&ev))
                            prop:value=new_password
                            class="input input-bordered"
                        />
                        {move || new_error.get().map(|msg| view! { <span class="text-error text-sm">{msg}</span> })}
                    </div>

                    <div class="form-control">
                        <label class="label" for="confirm-password">
                            <span class="label-text">"Confirm New Password"</span>
                        </label>
                        <input
                            id="confirm-password"
                            type="password"
                            placeholder="Confirm your new password"
                            on:input=move |ev| set_confirm.set(event_target_value(&ev))
                            prop:value=confirm
                            class="input input-bordered"
                        />
                        {move || confirm_error.get().map(|msg| view! { <span class="text-error text-sm">{msg}</span> })}
                    </div>

                    <button class="btn btn-primary" disabled=move || is_submitting.get()>
                        {move || {
                            if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }
                                    .into_any()
                            } else {
                                "Change Password".into_any()
                            }
                        }}
                    </button>
                </form>

                <p class="text-sm text-base-content/50 mt-2">
                    "Make sure your new password is strong and secure."
                </p>
            </div>
        </div>
    }
}
