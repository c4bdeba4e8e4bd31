/**
 * Session Cookie Transport
 *
 * Codec between session token strings and the HTTP cookie that carries
 * them. The cookie is HTTP-only (invisible to client-side script),
 * scoped to the whole site, Strict same-site, Secure in production,
 * and expires together with the token it carries.
 *
 * No state lives here; these are pure jar transforms.
 */

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Process-wide cookie attributes, fixed at startup.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Send the cookie only over HTTPS
    pub secure: bool,
    /// Cookie lifetime; kept aligned with the token lifetime
    pub max_age_secs: i64,
}

/// Attach the session token to the response jar.
pub fn set(jar: CookieJar, token: String, settings: &SessionSettings) -> CookieJar {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_secure(settings.secure);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");
    cookie.set_max_age(Duration::seconds(settings.max_age_secs));
    jar.add(cookie)
}

/// Read the session token from the request jar, if present.
pub fn get(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_owned())
}

/// Expire the session cookie immediately (sign-out).
pub fn clear(jar: CookieJar) -> CookieJar {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    jar.remove(cookie)
}
