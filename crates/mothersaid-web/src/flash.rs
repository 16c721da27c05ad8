//! One-shot flash messages, the server-side equivalent of the portal's
//! toasts. A mutation handler sets the cookie and redirects; the next page
//! render consumes it and shows a banner.

use axum_extra::extract::cookie::{Cookie, CookieJar};

const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Flash {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// Queue a flash for the next rendered page.
pub fn set_flash(jar: CookieJar, flash: Flash) -> CookieJar {
    let value = format!("{}|{}", flash.level.as_str(), encode(&flash.message));
    let mut cookie = Cookie::new(FLASH_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    jar.add(cookie)
}

/// Consume the pending flash, if any.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let flash = parse(cookie.value());
    let mut removal = Cookie::new(FLASH_COOKIE, "");
    removal.set_path("/");
    (jar.remove(removal), flash)
}

fn parse(value: &str) -> Option<Flash> {
    let (level, message) = value.split_once('|')?;
    let level = match level {
        "success" => Level::Success,
        "error" => Level::Error,
        _ => return None,
    };
    Some(Flash {
        level,
        message: decode(message),
    })
}

/// Banner markup for the page layout; empty string when there is nothing
/// to show.
pub fn render(flash: Option<&Flash>) -> String {
    match flash {
        Some(Flash {
            level: Level::Success,
            message,
        }) => format!(
            r#"<div class="flash flash-success" role="status">{}</div>"#,
            crate::layout::esc(message)
        ),
        Some(Flash {
            level: Level::Error,
            message,
        }) => format!(
            r#"<div class="flash flash-error" role="alert">{}</div>"#,
            crate::layout::esc(message)
        ),
        None => String::new(),
    }
}

// Cookie values cannot carry spaces, separators or non-ASCII; percent-encode
// everything outside the unreserved set.

fn encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn decode(s: &str) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    let mut iter = s.bytes();
    while let Some(b) = iter.next() {
        if b == b'%' {
            let hi = iter.next();
            let lo = iter.next();
            if let (Some(hi), Some(lo)) = (hi, lo) {
                let hex = [hi, lo];
                if let Ok(hex) = std::str::from_utf8(&hex) {
                    if let Ok(byte) = u8::from_str_radix(hex, 16) {
                        bytes.push(byte);
                        continue;
                    }
                }
            }
            bytes.push(b);
        } else {
            bytes.push(b);
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_round_trip() {
        let jar = set_flash(
            CookieJar::new(),
            Flash::success("Your admission number is MAS-2024-0153. Please save it for login."),
        );
        let (jar, flash) = take_flash(jar);
        let flash = flash.unwrap();
        assert_eq!(flash.level, Level::Success);
        assert_eq!(
            flash.message,
            "Your admission number is MAS-2024-0153. Please save it for login."
        );
        // Consumed: a second take finds nothing
        let (_, flash) = take_flash(jar);
        assert!(flash.is_none());
    }

    #[test]
    fn encode_survives_separators_and_unicode() {
        let message = "Passwords do not match. Please try again | 100% sure";
        let encoded = encode(message);
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('|'));
        assert_eq!(decode(&encoded), message);
        assert_eq!(decode(&encode("café ☕")), "café ☕");
    }

    #[test]
    fn no_flash_renders_nothing() {
        assert_eq!(render(None), "");
        let banner = render(Some(&Flash::error("Failed to load students")));
        assert!(banner.contains("flash-error"));
        assert!(banner.contains("Failed to load students"));
    }
}
