//! Landing page: greeting plus a live head count of the user base.

use std::collections::BTreeMap;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{use_api, Api};
use crate::components::icons::{KeyRound, RefreshCw, UserCheck, Users};
use crate::components::toast::use_toast;
use crate::error::ApiError;
use crate::list::ListQuery;
use crate::session::use_session;

#[derive(Clone, Copy)]
struct DashboardStats {
    total_users: u64,
    active_users: u64,
    roles: usize,
}

/// A `pageSize=1` page is the cheapest way to read a total off the list
/// endpoint, so the counts cost three small requests.
async fn fetch_stats(api: &Api) -> Result<DashboardStats, ApiError> {
    let totals = api
        .list_users(&ListQuery {
            page_size: 1,
            ..Default::default()
        })
        .await?;
    let active = api
        .list_users(&ListQuery {
            page_size: 1,
            filters: BTreeMap::from([("active".to_string(), "true".to_string())]),
            ..Default::default()
        })
        .await?;
    let roles = api.list_roles().await?;
    Ok(DashboardStats {
        total_users: totals.total_users,
        active_users: active.total_users,
        roles: roles.roles.len(),
    })
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let toast = use_toast();
    let api = use_api();

    let (stats, set_stats) = signal(Option::<DashboardStats>::None);
    let (loading, set_loading) = signal(true);

    let load_stats = move || {
        let api = api.clone();
        set_loading.set(true);
        spawn_local(async move {
            match fetch_stats(&api).await {
                Ok(data) => set_stats.set(Some(data)),
                Err(e) => toast.error(e.message()),
            }
            set_loading.set(false);
        });
    };
    load_stats();

    let user = session.user_signal();
    let greeting = move || match user.get() {
        Some(u) => format!("Welcome back, {}!", u.name),
        None => "Welcome back!".to_string(),
    };

    let total = move || {
        stats
            .get()
            .map(|s| s.total_users.to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    let active = move || {
        stats
            .get()
            .map(|s| s.active_users.to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    let roles = move || {
        stats
            .get()
            .map(|s| s.roles.to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">{greeting}</h1>
                    <p class="text-base-content/70 mt-1">
                        "Here is an overview of your user base."
                    </p>
                </div>
                <button
                    on:click=move |_| load_stats()
                    disabled=move || loading.get()
                    class="btn btn-ghost btn-circle"
                >
                    <RefreshCw attr:class=move || {
                        if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" }
                    } />
                </button>
            </div>

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-primary">
                        <Users attr:class="inline-block w-8 h-8" />
                    </div>
                    <div class="stat-title">"Total Users"</div>
                    <div class="stat-value text-primary">{total}</div>
                    <div class="stat-desc">"All registered accounts"</div>
                </div>

                <div class="stat">
                    <div class="stat-figure text-success">
                        <UserCheck attr:class="inline-block w-8 h-8" />
                    </div>
                    <div class="stat-title">"Active Users"</div>
                    <div class="stat-value text-success">{active}</div>
                    <div class="stat-desc">"Accounts currently enabled"</div>
                </div>

                <div class="stat">
                    <div class="stat-figure text-secondary">
                        <KeyRound attr:class="inline-block w-8 h-8" />
                    </div>
                    <div class="stat-title">"Roles"</div>
                    <div class="stat-value text-secondary">{roles}</div>
                    <div class="stat-desc">"Assignable permission levels"</div>
                </div>
            </div>
        </div>
    }
}
