//! Build-time application configuration.
//!
//! Values are baked in at compile time, the same way the bundler would
//! inline environment variables. Each accessor falls back to a sane
//! default so a plain `trunk serve` works against a local API.

pub fn app_name() -> &'static str {
    option_env!("STARBOARD_APP_NAME").unwrap_or("Starboard")
}

pub fn backend_url() -> &'static str {
    option_env!("STARBOARD_BACKEND_URL").unwrap_or("http://localhost:3000")
}

/// Whether the login screen offers self-registration. The register route
/// itself stays reachable; only the link is gated.
pub fn allow_registration() -> bool {
    matches!(option_env!("STARBOARD_ALLOW_REGISTRATION"), Some("true"))
}
