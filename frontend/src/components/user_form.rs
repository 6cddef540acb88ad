//! User create/edit screen. One component serves both modes; an `id`
//! prop switches it to edit.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::toast::use_toast;
use crate::web::router::use_router;

mod form_state;
use form_state::UserFormState;

#[component]
pub fn UserFormPage(
    /// Present for `/users/{id}/edit`, absent for `/users/new`.
    #[prop(optional)]
    id: Option<u64>,
) -> impl IntoView {
    let router = use_router();
    let toast = use_toast();
    let api = use_api();

    let form = UserFormState::new();
    let (roles, set_roles) = signal(Vec::<(String, String)>::new());
    let (is_submitting, set_is_submitting) = signal(false);

    // Role options come from the server.
    {
        let api = api.clone();
        spawn_local(async move {
            match api.list_roles().await {
                Ok(response) => set_roles.set(response.roles.into_iter().collect()),
                Err(_) => toast.error("Failed to fetch roles"),
            }
        });
    }

    // Edit mode starts from the stored user.
    if let Some(id) = id {
        let api = api.clone();
        spawn_local(async move {
            match api.get_user(id).await {
                Ok(user) => form.load(&user),
                Err(_) => toast.error("Failed to fetch user details"),
            }
        });
    }

    let is_create = id.is_none();
    let title = if is_create { "Create User" } else { "Edit User" };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get() {
            return;
        }
        if !form.validate(is_create) {
            return;
        }

        set_is_submitting.set(true);
        let api = api.clone();
        spawn_local(async move {
            let outcome = match id {
                None => api.create_user(&form.create_request()).await,
                Some(id) => api.update_user(id, &form.update_request()).await,
            };
            match outcome {
                Ok(()) => {
                    toast.success(if is_create {
                        "User created successfully"
                    } else {
                        "User updated successfully"
                    });
                    router.navigate("/users");
                }
                Err(e) => toast.error(e.message()),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-2xl mx-auto space-y-6">
            <h1 class="text-2xl font-bold">{title}</h1>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <form class="space-y-4" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">"Full Name"</span>
                            </label>
                            <input
                                id="name"
                                type="text"
                                placeholder="John Doe"
                                on:input=move |ev| form.name.set(event_target_value(&ev))
                                prop:value=form.name
                                class="input input-bordered"
                            />
                            {move || form.name_error.get().map(|msg| view! { <span class="text-error text-sm">{msg}</span> })}
                        </div>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email Address"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="m@example.com"
                                on:input=move |ev| form.email.set(event_target_value(&ev))
                                prop:value=form.email
                                class="input input-bordered"
                            />
                            {move || form.email_error.get().map(|msg| view! { <span class="text-error text-sm">{msg}</span> })}
                        </div>

                        <Show when=move || is_create>
                            <div class="form-control">
                                <label class="label" for="password">
                                    <span class="label-text">"Password"</span>
                                </label>
                                <input
                                    id="password"
                                    type="password"
                                    placeholder="Enter a secure password"
                                    on:input=move |ev| form.password.set(event_target_value(&ev))
                                    prop:value=form.password
                                    class="input input-bordered"
                                />
                                {move || form.password_error.get().map(|msg| view! { <span class="text-error text-sm">{msg}</span> })}
                            </div>
                        </Show>

                        <div class="grid gap-4 md:grid-cols-2">
                            <div class="form-control">
                                <label class="label" for="role">
                                    <span class="label-text">"Role"</span>
                                </label>
                                <select
                                    id="role"
                                    class="select select-bordered"
                                    on:change=move |ev| form.role.set(event_target_value(&ev))
                                >
                                    <option value="" disabled=true selected=move || form.role.get().is_empty()>
                                        "Select a role"
                                    </option>
                                    <For
                                        each=move || roles.get()
                                        key=|(key, _)| key.clone()
                                        children=move |(key, label)| {
                                            let value = key.clone();
                                            view! {
                                                <option value=key selected=move || form.role.get() == value>
                                                    {label}
                                                </option>
                                            }
                                        }
                                    />
                                </select>
                                {move || form.role_error.get().map(|msg| view! { <span class="text-error text-sm">{msg}</span> })}
                            </div>

                            <div class="form-control justify-end">
                                <label class="label cursor-pointer justify-start gap-4" for="active">
                                    <span class="label-text">"Active"</span>
                                    <input
                                        id="active"
                                        type="checkbox"
                                        class="toggle toggle-primary"
                                        prop:checked=form.active
                                        on:change=move |ev| form.active.set(event_target_checked(&ev))
                                    />
                                </label>
                            </div>
                        </div>

                        <div class="flex gap-4 mt-2">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || {
                                    if is_submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "Saving..." }
                                            .into_any()
                                    } else if is_create {
                                        "Create User".into_any()
                                    } else {
                                        "Save Changes".into_any()
                                    }
                                }}
                            </button>
                            <button
                                type="button"
                                class="btn btn-ghost"
                                on:click=move |_| router.navigate("/users")
                            >
                                "Cancel"
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
