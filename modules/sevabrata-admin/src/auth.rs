use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use sevabrata_common::Config;

use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

const COOKIE_NAME: &str = "sb_admin_session";
const SESSION_DURATION_SECS: i64 = 24 * 3600; // 24 hours
const SESSION_SUBJECT: &str = "admin";

/// Return the session signing secret. Prefers SESSION_SECRET env var;
/// falls back to admin_password (for dev compatibility).
pub fn session_secret(config: &Config) -> &str {
    if config.session_secret.is_empty() {
        &config.admin_password
    } else {
        &config.session_secret
    }
}

/// Exact, case-sensitive password check, constant-time to avoid leaking
/// prefix length through timing.
pub fn check_password(submitted: &str, expected: &str) -> bool {
    constant_time_eq(submitted.as_bytes(), expected.as_bytes())
}

/// Authenticated admin session. Extract this in handlers that require auth.
/// If the session cookie is missing, invalid, or expired, returns a
/// redirect to /admin/login.
pub struct AdminSession;

impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let cookie_header = parts
            .headers
            .get(axum::http::header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if let Some(value) = parse_cookie(cookie_header, COOKIE_NAME) {
            if verify_session(value, session_secret(&state.config)) {
                return Ok(AdminSession);
            }
        }

        Err(Redirect::to("/admin/login").into_response())
    }
}

/// Create a signed session cookie value: `admin|expiry|signature`
pub fn create_session(secret: &str) -> String {
    let expiry = chrono::Utc::now().timestamp() + SESSION_DURATION_SECS;
    let payload = format!("{SESSION_SUBJECT}|{expiry}");
    let sig = sign(&payload, secret);
    format!("{payload}|{sig}")
}

/// Build the Set-Cookie header value.
/// In release builds, adds `Secure` flag to prevent transmission over HTTP.
pub fn session_cookie(secret: &str) -> String {
    let value = create_session(secret);
    let secure = if cfg!(debug_assertions) { "" } else { "; Secure" };
    format!(
        "{COOKIE_NAME}={value}; Path=/admin; HttpOnly; SameSite=Lax; Max-Age={SESSION_DURATION_SECS}{secure}"
    )
}

/// Build a Set-Cookie header that clears the session.
pub fn clear_session_cookie() -> String {
    format!("{COOKIE_NAME}=; Path=/admin; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Verify a session cookie value: signature first, then expiry.
fn verify_session(value: &str, secret: &str) -> bool {
    let parts: Vec<&str> = value.splitn(3, '|').collect();
    if parts.len() != 3 {
        return false;
    }

    let subject = parts[0];
    let expiry_str = parts[1];
    let sig = parts[2];

    if subject != SESSION_SUBJECT {
        return false;
    }

    let payload = format!("{subject}|{expiry_str}");
    let expected_sig = sign(&payload, secret);
    if !constant_time_eq(sig.as_bytes(), expected_sig.as_bytes()) {
        return false;
    }

    let Ok(expiry) = expiry_str.parse::<i64>() else {
        return false;
    };
    chrono::Utc::now().timestamp() <= expiry
}

fn sign(payload: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time comparison to prevent timing attacks.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Parse a specific cookie from the Cookie header string.
fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    for part in header.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(name) {
            if let Some(value) = value.strip_prefix('=') {
                return Some(value);
            }
        }
    }
    None
}

/// Sliding one-hour window per client IP.
pub fn check_rate_limit(
    entries: &mut Vec<std::time::Instant>,
    now: std::time::Instant,
    max_per_hour: usize,
) -> bool {
    let cutoff = now - std::time::Duration::from_secs(3600);
    entries.retain(|t| *t > cutoff);
    if entries.len() >= max_per_hour {
        return false;
    }
    entries.push(now);
    true
}

/// Drop IPs whose attempts have all aged out of the window, to prevent
/// unbounded HashMap growth.
pub fn prune_stale_attempts(
    attempts: &mut std::collections::HashMap<std::net::IpAddr, Vec<std::time::Instant>>,
    now: std::time::Instant,
) {
    let cutoff = now - std::time::Duration::from_secs(3600);
    attempts.retain(|_, entries| entries.iter().any(|t| *t > cutoff));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_session() {
        let secret = "test-secret-key";
        let cookie_value = create_session(secret);
        assert!(verify_session(&cookie_value, secret));
    }

    #[test]
    fn rejects_tampered_session() {
        let secret = "test-secret-key";
        let cookie_value = create_session(secret);
        // Push the expiry a year out without re-signing
        let parts: Vec<&str> = cookie_value.splitn(3, '|').collect();
        let expiry: i64 = parts[1].parse().unwrap();
        let tampered = format!("{}|{}|{}", parts[0], expiry + 31_536_000, parts[2]);
        assert!(!verify_session(&tampered, secret));
    }

    #[test]
    fn rejects_wrong_secret() {
        let cookie_value = create_session("secret-a");
        assert!(!verify_session(&cookie_value, "secret-b"));
    }

    #[test]
    fn rejects_expired_session() {
        let secret = "test-secret";
        // Manually create an expired session
        let expiry = chrono::Utc::now().timestamp() - 100;
        let payload = format!("{SESSION_SUBJECT}|{expiry}");
        let sig = sign(&payload, secret);
        let value = format!("{payload}|{sig}");
        assert!(!verify_session(&value, secret));
    }

    #[test]
    fn password_check_is_exact_and_case_sensitive() {
        assert!(check_password("SevaSecret1", "SevaSecret1"));
        assert!(!check_password("sevasecret1", "SevaSecret1"));
        assert!(!check_password("SevaSecret1 ", "SevaSecret1"));
        assert!(!check_password("", "SevaSecret1"));
    }

    #[test]
    fn parse_cookie_works() {
        assert_eq!(
            parse_cookie("sb_admin_session=abc123; other=xyz", "sb_admin_session"),
            Some("abc123")
        );
        assert_eq!(
            parse_cookie("other=xyz; sb_admin_session=abc123", "sb_admin_session"),
            Some("abc123")
        );
        assert_eq!(parse_cookie("other=xyz", "sb_admin_session"), None);
    }

    #[test]
    fn stale_ips_are_pruned_from_the_attempt_map() {
        use std::collections::HashMap;
        use std::net::{IpAddr, Ipv4Addr};
        use std::time::{Duration, Instant};

        let now = Instant::now();
        let old_ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        let fresh_ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

        let mut attempts = HashMap::new();
        attempts.insert(old_ip, vec![now]);
        attempts.insert(fresh_ip, vec![now + Duration::from_secs(4000)]);

        prune_stale_attempts(&mut attempts, now + Duration::from_secs(4001));
        assert!(!attempts.contains_key(&old_ip));
        assert!(attempts.contains_key(&fresh_ip));
    }

    #[test]
    fn rate_limit_window() {
        use std::time::{Duration, Instant};
        let mut entries = Vec::new();
        let now = Instant::now();
        for _ in 0..10 {
            assert!(check_rate_limit(&mut entries, now, 10));
        }
        assert!(!check_rate_limit(&mut entries, now, 10));
        // Entries age out of the window
        assert!(check_rate_limit(
            &mut entries,
            now + Duration::from_secs(3601),
            10
        ));
    }
}
