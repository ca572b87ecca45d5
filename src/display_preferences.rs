//! Per-session display preferences stored in a private cookie.
//!
//! The only preference is dark mode. The cookie has no expiry date so the
//! preference lasts as long as the browser session.

use axum::response::Redirect;
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};

use crate::endpoints;

pub(crate) const COOKIE_DARK_MODE: &str = "dark_mode";

/// Read the dark mode preference from `jar`.
///
/// A missing cookie, or one that cannot be decrypted or parsed, means light mode.
pub(crate) fn get_dark_mode(jar: &PrivateCookieJar) -> bool {
    jar.get(COOKIE_DARK_MODE)
        .and_then(|cookie| cookie.value_trimmed().parse().ok())
        .unwrap_or(false)
}

/// Store the dark mode preference in `jar`.
///
/// Returns the cookie jar with the cookie added.
pub(crate) fn set_dark_mode(jar: PrivateCookieJar, dark_mode: bool) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_DARK_MODE, dark_mode.to_string()))
            .path(endpoints::ROOT)
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Flip the dark mode preference for the current session and go back to the expense list.
pub async fn toggle_dark_mode_endpoint(jar: PrivateCookieJar) -> (PrivateCookieJar, Redirect) {
    let dark_mode = !get_dark_mode(&jar);
    tracing::debug!("Setting dark mode to {dark_mode}");

    (set_dark_mode(jar, dark_mode), Redirect::to(endpoints::ROOT))
}
