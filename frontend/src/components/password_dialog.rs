//! Admin dialog that sets a new password for a listed user.

use leptos::prelude::*;
use leptos::task::spawn_local;
use starboard_shared::SetPasswordRequest;

use crate::api::use_api;
use crate::components::toast::use_toast;
use crate::validate::{first, min_len, must_match, required};

#[component]
pub fn PasswordDialog(
    /// The user whose password is being replaced; `Some` opens the dialog.
    target: RwSignal<Option<u64>>,
) -> impl IntoView {
    let toast = use_toast();
    let api = use_api();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (password_error, set_password_error) = signal(Option::<&'static str>::None);
    let (confirm_error, set_confirm_error) = signal(Option::<&'static str>::None);
    let (is_submitting, set_is_submitting) = signal(false);

    let reset_form = move || {
        set_password.set(String::new());
        set_confirm.set(String::new());
        set_password_error.set(None);
        set_confirm_error.set(None);
    };

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if target.get().is_some() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get() {
            return;
        }
        let Some(id) = target.get() else {
            return;
        };

        let password_violation = first([
            required(&password.get(), "Password is required"),
            min_len(&password.get(), 6, "Password must be at least 6 characters long"),
        ]);
        let confirm_violation = first([
            required(&confirm.get(), "Confirm Password is required"),
            must_match(&confirm.get(), &password.get(), "Passwords do not match!"),
        ]);
        set_password_error.set(password_violation);
        set_confirm_error.set(confirm_violation);
        if password_violation.is_some() || confirm_violation.is_some() {
            return;
        }

        set_is_submitting.set(true);
        let api = api.clone();
        spawn_local(async move {
            let request = SetPasswordRequest {
                password: password.get_untracked(),
            };
            match api.set_user_password(id, &request).await {
                Ok(()) => {
                    toast.success("Password changed successfully!");
                    target.set(None);
                    reset_form();
                }
                Err(e) => toast.error(e.message()),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| target.set(None)>
            <div class="modal-box sm:max-w-md">
                <h3 class="font-bold text-lg">"Change Password"</h3>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    <div class="form-control">
                        <input
                            type="password"
                            placeholder="New Password"
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                            class="input input-bordered w-full"
                        />
                        {move || password_error.get().map(|msg| view! { <span class="text-error text-sm">{msg}</span> })}
                    </div>

                    <div class="form-control">
                        <input
                            type="password"
                            placeholder="Confirm Password"
                            on:input=move |ev| set_confirm.set(event_target_value(&ev))
                            prop:value=confirm
                            class="input input-bordered w-full"
                        />
                        {move || confirm_error.get().map(|msg| view! { <span class="text-error text-sm">{msg}</span> })}
                    </div>

                    <div class="modal-action">
                        <button
                            type="button"
                            class="btn btn-ghost"
                            disabled=move || is_submitting.get()
                            on:click=move |_| {
                                target.set(None);
                                reset_form();
                            }
                        >
                            "Cancel"
                        </button>
                        <button class="btn btn-primary" disabled=move || is_submitting.get()>
                            {move || {
                                if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Changing..." }
                                        .into_any()
                                } else {
                                    "Change Password".into_any()
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
