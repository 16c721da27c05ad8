//! Bearer tokens live in HTTP-only cookies. Students and admins are
//! independent sessions; the admin's role rides along so the sidebar can be
//! filtered without a round trip.

use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const STUDENT_TOKEN: &str = "student_token";
pub const ADMIN_TOKEN: &str = "admin_token";
pub const ADMIN_ROLE: &str = "admin_role";

pub const STUDENT_LOGIN: &str = "/portal/login";
pub const ADMIN_LOGIN: &str = "/portal/admin/login";

fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

fn removal(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie
}

pub fn student_token(jar: &CookieJar) -> Option<String> {
    jar.get(STUDENT_TOKEN).map(|c| c.value().to_string())
}

pub fn admin_token(jar: &CookieJar) -> Option<String> {
    jar.get(ADMIN_TOKEN).map(|c| c.value().to_string())
}

pub fn admin_role(jar: &CookieJar) -> Option<String> {
    jar.get(ADMIN_ROLE).map(|c| c.value().to_string())
}

/// Token for a student page, or the redirect to the login page.
pub fn require_student(jar: &CookieJar) -> Result<String, Redirect> {
    student_token(jar).ok_or_else(|| Redirect::to(STUDENT_LOGIN))
}

/// Token and role for an admin page, or the redirect to the admin login.
pub fn require_admin(jar: &CookieJar) -> Result<(String, String), Redirect> {
    match (admin_token(jar), admin_role(jar)) {
        (Some(token), Some(role)) => Ok((token, role)),
        _ => Err(Redirect::to(ADMIN_LOGIN)),
    }
}

pub fn open_student_session(jar: CookieJar, token: String) -> CookieJar {
    jar.add(session_cookie(STUDENT_TOKEN, token))
}

pub fn open_admin_session(jar: CookieJar, token: String, role: String) -> CookieJar {
    jar.add(session_cookie(ADMIN_TOKEN, token))
        .add(session_cookie(ADMIN_ROLE, role))
}

pub fn close_student_session(jar: CookieJar) -> CookieJar {
    jar.remove(removal(STUDENT_TOKEN))
}

pub fn close_admin_session(jar: CookieJar) -> CookieJar {
    jar.remove(removal(ADMIN_TOKEN)).remove(removal(ADMIN_ROLE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_round_trip() {
        let jar = CookieJar::new();
        assert!(student_token(&jar).is_none());
        assert!(require_student(&jar).is_err());

        let jar = open_student_session(jar, "tok-123".to_string());
        assert_eq!(student_token(&jar).as_deref(), Some("tok-123"));
        assert_eq!(require_student(&jar).unwrap(), "tok-123");

        let jar = close_student_session(jar);
        assert!(student_token(&jar).is_none());
    }

    #[test]
    fn admin_session_requires_both_cookies() {
        let jar = open_admin_session(CookieJar::new(), "tok-9".to_string(), "teacher".to_string());
        let (token, role) = require_admin(&jar).unwrap();
        assert_eq!(token, "tok-9");
        assert_eq!(role, "teacher");

        // A bare token without a role is not a session
        let jar = CookieJar::new().add(Cookie::new(ADMIN_TOKEN, "tok-9"));
        assert!(require_admin(&jar).is_err());
    }

    #[test]
    fn cookies_are_http_only() {
        let jar = open_student_session(CookieJar::new(), "tok".to_string());
        let cookie = jar.get(STUDENT_TOKEN).unwrap();
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}
