//! User management screen: search, filters, a sortable paged table,
//! export, and the row-action dialogs.
//!
//! All fetches go through [`ListState`]: every handler asks the state
//! machine for a stamped query and hands the outcome back to it, so
//! out-of-order responses are discarded instead of rendered.

mod pagination;

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;
use starboard_shared::{SortDirection, User};

use crate::api::use_api;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::icons::{
    ChevronDown, ChevronUp, ChevronsUpDown, Download, KeyRound, MoreHorizontal, Pencil, RefreshCw,
    Search, Trash2, UserPlus,
};
use crate::components::password_dialog::PasswordDialog;
use crate::components::toast::use_toast;
use crate::list::{ListPhase, ListState, StampedQuery, DEFAULT_PAGE_SIZE};
use crate::web::download::save_file;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use pagination::Pagination;

/// `lastLogin` cell text, or "Never" for accounts that have not signed in.
fn format_last_login(value: Option<&DateTime<Utc>>) -> String {
    match value {
        Some(at) => at.format("%b %-d, %Y %H:%M").to_string(),
        None => "Never".to_string(),
    }
}

#[component]
pub fn UserListPage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();
    let router = use_router();

    let state = RwSignal::new(ListState::new());
    let roles = RwSignal::new(Vec::<(String, String)>::new());
    let exporting = RwSignal::new(false);
    let delete_target = RwSignal::new(None::<u64>);
    let confirm_delete = RwSignal::new(false);
    let password_target = RwSignal::new(None::<u64>);

    let is_loading = Signal::derive(move || state.with(|s| s.phase() == ListPhase::Loading));
    let current_page = Signal::derive(move || state.with(|s| s.query().page));
    let total_pages = Signal::derive(move || state.with(|s| s.total_pages()));
    let total_records = Signal::derive(move || state.with(|s| s.total_users()));

    // Runs the fetch for a freshly stamped query. `None` means the
    // operation was a no-op and there is nothing to fetch.
    let load = {
        let api = api.clone();
        move |stamp: Option<StampedQuery>| {
            let Some(stamp) = stamp else {
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                let outcome = api.list_users(&stamp.query).await;
                state.update(|s| {
                    s.apply(&stamp, outcome);
                });
            });
        }
    };

    load(state.try_update(|s| s.begin()));

    {
        let api = api.clone();
        spawn_local(async move {
            match api.list_roles().await {
                Ok(response) => roles.set(response.roles.into_iter().collect()),
                Err(_) => toast.error("Failed to fetch roles"),
            }
        });
    }

    let on_sort = {
        let load = load.clone();
        Callback::new(move |field: &'static str| {
            load(state.try_update(|s| s.set_sort(field)));
        })
    };

    let on_page = {
        let load = load.clone();
        Callback::new(move |page: u32| {
            load(state.try_update(|s| s.set_page(page)).flatten());
        })
    };

    let on_delete = {
        let api = api.clone();
        let load = load.clone();
        Callback::new(move |_: ()| {
            let Some(id) = delete_target.get_untracked() else {
                return;
            };
            let api = api.clone();
            let load = load.clone();
            spawn_local(async move {
                match api.delete_user(id).await {
                    Ok(()) => {
                        toast.success("User deleted successfully");
                        load(state.try_update(|s| s.remove_row(id)).flatten());
                    }
                    Err(e) => toast.error(e.message()),
                }
                delete_target.set(None);
            });
        })
    };

    let export = {
        let api = api.clone();
        move || {
            if exporting.get_untracked() {
                return;
            }
            exporting.set(true);
            let api = api.clone();
            spawn_local(async move {
                let query = state.with_untracked(|s| s.query().clone());
                match api.export_users(&query, "xlsx").await {
                    Ok(download) => save_file(&download),
                    Err(e) => toast.error(e.message()),
                }
                exporting.set(false);
            });
        }
    };

    view! {
        <div class="space-y-4">
            <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                <h1 class="text-2xl font-bold">"User Management"</h1>
                <div class="flex items-center gap-2">
                    <button
                        class="btn btn-ghost btn-sm btn-circle"
                        disabled=move || is_loading.get()
                        on:click={
                            let load = load.clone();
                            move |_| load(state.try_update(|s| s.begin()))
                        }
                    >
                        <RefreshCw attr:class=move || {
                            if is_loading.get() { "h-4 w-4 animate-spin" } else { "h-4 w-4" }
                        } />
                    </button>
                    <button
                        class="btn btn-outline btn-sm"
                        disabled=move || exporting.get()
                        on:click=move |_| export()
                    >
                        <Download attr:class="h-4 w-4" />
                        {move || if exporting.get() { "Exporting..." } else { "Export" }}
                    </button>
                    <button
                        class="btn btn-primary btn-sm"
                        on:click=move |_| router.navigate_route(AppRoute::UserCreate)
                    >
                        <UserPlus attr:class="h-4 w-4" />
                        "Create User"
                    </button>
                </div>
            </div>

            <div class="flex flex-col md:flex-row gap-2">
                <label class="input input-bordered flex items-center gap-2 md:w-72">
                    <Search attr:class="h-4 w-4 opacity-50" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Search users..."
                        prop:value=move || state.with(|s| s.query().search.clone())
                        on:input={
                            let load = load.clone();
                            move |ev| {
                                load(state.try_update(|s| s.set_search(&event_target_value(&ev))))
                            }
                        }
                    />
                </label>
                <select
                    class="select select-bordered md:w-44"
                    on:change={
                        let load = load.clone();
                        move |ev| {
                            load(state.try_update(|s| {
                                s.set_filter("roles", &event_target_value(&ev))
                            }))
                        }
                    }
                >
                    <option value="">"All Roles"</option>
                    <For
                        each=move || roles.get()
                        key=|(key, _)| key.clone()
                        children=move |(key, label)| {
                            view! { <option value=key>{label}</option> }
                        }
                    />
                </select>
                <select
                    class="select select-bordered md:w-44"
                    on:change={
                        let load = load.clone();
                        move |ev| {
                            load(state.try_update(|s| {
                                s.set_filter("active", &event_target_value(&ev))
                            }))
                        }
                    }
                >
                    <option value="">"All Statuses"</option>
                    <option value="true">"Active"</option>
                    <option value="false">"Inactive"</option>
                </select>
            </div>

            {
                let load = load.clone();
                move || {
                    state.with(|s| s.phase() == ListPhase::Error).then(|| {
                        let load = load.clone();
                        view! {
                            <div class="alert alert-error">
                                <span>
                                    {move || {
                                        state.with(|s| s.error().unwrap_or_default().to_string())
                                    }}
                                </span>
                                <button
                                    class="btn btn-sm"
                                    on:click=move |_| load(state.try_update(|s| s.begin()))
                                >
                                    "Retry"
                                </button>
                            </div>
                        }
                    })
                }
            }

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-4">
                    <div class="overflow-x-auto">
                        <table class="table table-zebra">
                            <thead>
                                <tr>
                                    <SortableHeader label="Name" field="name" state=state on_sort=on_sort />
                                    <SortableHeader label="Email" field="email" state=state on_sort=on_sort />
                                    <SortableHeader label="Role" field="role" state=state on_sort=on_sort />
                                    <SortableHeader
                                        label="Last Login"
                                        field="lastLogin"
                                        state=state
                                        on_sort=on_sort
                                    />
                                    <th>"Active"</th>
                                    <th class="text-right">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || {
                                    state.with(|s| s.phase() == ListPhase::Loading && s.rows().is_empty())
                                }>
                                    <tr>
                                        <td colspan="6" class="text-center py-8">
                                            <span class="loading loading-spinner loading-md"></span>
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || {
                                    state.with(|s| s.phase() != ListPhase::Loading && s.rows().is_empty())
                                }>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/60">
                                            "No users found."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || state.with(|s| s.rows().to_vec())
                                    key=|user| user.clone()
                                    children=move |user| {
                                        let User { id, name, email, role, active, last_login } = user;
                                        let last_login = format_last_login(last_login.as_ref());
                                        let role_label = {
                                            let role = role.clone();
                                            move || {
                                                roles.with(|all| {
                                                    all.iter()
                                                        .find(|(key, _)| key == &role)
                                                        .map(|(_, label)| label.clone())
                                                        .unwrap_or_else(|| role.clone())
                                                })
                                            }
                                        };
                                        view! {
                                            <tr>
                                                <td class="font-medium">{name}</td>
                                                <td>{email}</td>
                                                <td>
                                                    <span class="badge badge-outline">{role_label}</span>
                                                </td>
                                                <td>{last_login}</td>
                                                <td>
                                                    {if active {
                                                        view! {
                                                            <span class="badge badge-success">"Active"</span>
                                                        }
                                                            .into_any()
                                                    } else {
                                                        view! {
                                                            <span class="badge badge-ghost">"Inactive"</span>
                                                        }
                                                            .into_any()
                                                    }}
                                                </td>
                                                <td class="text-right">
                                                    <div class="dropdown dropdown-end">
                                                        <div
                                                            tabindex="0"
                                                            role="button"
                                                            class="btn btn-ghost btn-sm btn-circle"
                                                        >
                                                            <MoreHorizontal attr:class="h-4 w-4" />
                                                        </div>
                                                        <ul
                                                            tabindex="0"
                                                            class="menu menu-sm dropdown-content bg-base-100 rounded-box z-[1] w-48 p-2 shadow"
                                                        >
                                                            <li>
                                                                <button on:click=move |_| {
                                                                    router.navigate_route(AppRoute::UserEdit { id })
                                                                }>
                                                                    <Pencil attr:class="h-4 w-4" />
                                                                    "Edit"
                                                                </button>
                                                            </li>
                                                            <li>
                                                                <button on:click=move |_| {
                                                                    password_target.set(Some(id))
                                                                }>
                                                                    <KeyRound attr:class="h-4 w-4" />
                                                                    "Change Password"
                                                                </button>
                                                            </li>
                                                            <li>
                                                                <button
                                                                    class="text-error"
                                                                    on:click=move |_| {
                                                                        delete_target.set(Some(id));
                                                                        confirm_delete.set(true);
                                                                    }
                                                                >
                                                                    <Trash2 attr:class="h-4 w-4" />
                                                                    "Delete"
                                                                </button>
                                                            </li>
                                                        </ul>
                                                    </div>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>

                    <Pagination
                        current_page=current_page
                        total_pages=total_pages
                        total_records=total_records
                        page_size=DEFAULT_PAGE_SIZE
                        on_page=on_page
                    />
                </div>
            </div>

            <PasswordDialog target=password_target />
            <ConfirmDialog
                title="Are you sure you want to delete this user?"
                description="This action cannot be undone."
                open=confirm_delete
                on_confirm=on_delete
            />
        </div>
    }
}

/// Column header that reflects and drives the sort order.
#[component]
fn SortableHeader(
    label: &'static str,
    field: &'static str,
    state: RwSignal<ListState>,
    #[prop(into)] on_sort: Callback<&'static str>,
) -> impl IntoView {
    let indicator = move || {
        state.with(|s| {
            if s.query().sort_by == field {
                match s.query().sort_order {
                    SortDirection::Asc => view! { <ChevronUp attr:class="h-4 w-4" /> }.into_any(),
                    SortDirection::Desc => {
                        view! { <ChevronDown attr:class="h-4 w-4" /> }.into_any()
                    }
                }
            } else {
                view! { <ChevronsUpDown attr:class="h-4 w-4 opacity-30" /> }.into_any()
            }
        })
    };

    view! {
        <th>
            <button
                class="flex items-center gap-1 cursor-pointer select-none"
                on:click=move |_| on_sort.run(field)
            >
                {label}
                {indicator}
            </button>
        </th>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_last_login() {
        let at = Utc.with_ymd_and_hms(2024, 5, 20, 15, 4, 0).unwrap();
        assert_eq!(format_last_login(Some(&at)), "May 20, 2024 15:04");
        assert_eq!(format_last_login(None), "Never");
    }
}
