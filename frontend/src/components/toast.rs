//! Transient notifications.
//!
//! One queue for the whole app: screens push success/error messages
//! through [`ToastContext`] and the [`Toaster`] renders whatever is
//! currently alive. Every toast dismisses itself after a few seconds.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const TOAST_MILLIS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
struct Toast {
    id: u64,
    kind: ToastKind,
    message: String,
}

/// Shared toast queue. `RwSignal` keeps it `Copy`, so handlers can
/// capture it freely.
#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastContext {
    fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        let id = self.next_id.get_untracked() + 1;
        self.next_id.set(id);

        self.toasts.update(|queue| queue.push(Toast { id, kind, message }));

        let toasts = self.toasts;
        Timeout::new(TOAST_MILLIS, move || {
            toasts.update(|queue| queue.retain(|toast| toast.id != id));
        })
        .forget();
    }
}

pub fn provide_toasts() -> ToastContext {
    let ctx = ToastContext::new();
    provide_context(ctx);
    ctx
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

/// Renders the live queue. Mount once, above the router.
#[component]
pub fn Toaster() -> impl IntoView {
    let ctx = use_toast();

    view! {
        <div class="toast toast-top toast-center z-50">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.kind {
                        ToastKind::Success => "alert alert-success shadow-lg",
                        ToastKind::Error => "alert alert-error shadow-lg",
                    };
                    view! {
                        <div class=class>
                            <span>{toast.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
