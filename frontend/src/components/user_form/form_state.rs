//! Form state for the user create/edit screen.
//!
//! One struct instead of a dozen loose signals. `RwSignal` is `Copy`, so
//! the whole state moves freely into event handlers and child views.

use leptos::prelude::*;
use starboard_shared::{CreateUserRequest, UpdateUserRequest, User};

use crate::validate::{email_format, first, min_len, required};

#[derive(Clone, Copy)]
pub struct UserFormState {
    pub name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub role: RwSignal<String>,
    pub active: RwSignal<bool>,

    pub name_error: RwSignal<Option<&'static str>>,
    pub email_error: RwSignal<Option<&'static str>>,
    pub password_error: RwSignal<Option<&'static str>>,
    pub role_error: RwSignal<Option<&'static str>>,
}

impl UserFormState {
    /// Fresh form; new accounts start out active.
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            role: RwSignal::new(String::new()),
            active: RwSignal::new(true),
            name_error: RwSignal::new(None),
            email_error: RwSignal::new(None),
            password_error: RwSignal::new(None),
            role_error: RwSignal::new(None),
        }
    }

    /// Fills the form from a stored user (edit mode). The password field
    /// stays empty; edit never sends one.
    pub fn load(&self, user: &User) {
        self.name.set(user.name.clone());
        self.email.set(user.email.clone());
        self.role.set(user.role.clone());
        self.active.set(user.active);
    }

    /// Runs the rule chains and publishes per-field violations. The
    /// password rule applies only when the form shows the field (create
    /// mode); the field is optional there with a length floor when set.
    pub fn validate(&self, with_password: bool) -> bool {
        let name = required(&self.name.get(), "Name is required");
        let email = first([
            required(&self.email.get(), "Email is required"),
            email_format(&self.email.get(), "Invalid email address"),
        ]);
        let password = if with_password {
            min_len(
                &self.password.get(),
                6,
                "Password must be at least 6 characters long",
            )
        } else {
            None
        };
        let role = required(&self.role.get(), "Role is required");

        self.name_error.set(name);
        self.email_error.set(email);
        self.password_error.set(password);
        self.role_error.set(role);

        [name, email, password, role].iter().all(Option::is_none)
    }

    pub fn create_request(&self) -> CreateUserRequest {
        CreateUserRequest {
            name: self.name.get(),
            email: self.email.get(),
            password: self.password.get(),
            role: self.role.get(),
            active: self.active.get(),
        }
    }

    pub fn update_request(&self) -> UpdateUserRequest {
        UpdateUserRequest {
            name: self.name.get(),
            email: self.email.get(),
            role: self.role.get(),
            active: self.active.get(),
        }
    }
}

impl Default for UserFormState {
    fn default() -> Self {
        Self::new()
    }
}
