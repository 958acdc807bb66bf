//! Redirect policy for page paths.
//!
//! Pages behind a session send anonymous visitors to `/signin`; the sign-in
//! and sign-up pages send signed-in visitors home. API calls, framework
//! assets and static files are never redirected.

pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "vi"];
pub const PRIVATE_PREFIXES: [&str; 3] = ["/dashboard", "/admin", "/notifications"];
pub const AUTH_PAGES: [&str; 2] = ["/signin", "/signup"];
pub const SIGN_IN_PATH: &str = "/signin";
pub const HOME_PATH: &str = "/";

/// Outcome of evaluating a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the request through.
    Continue,
    /// Send a temporary redirect to the given location.
    Redirect(&'static str),
}

/// True for paths the guard ignores entirely.
pub fn is_exempt(path: &str) -> bool {
    path == "/api"
        || path.starts_with("/api/")
        || path.starts_with("/_next")
        || path.contains('.')
}

/// Removes a leading `/en` or `/vi` segment.
pub fn strip_locale(path: &str) -> &str {
    for locale in SUPPORTED_LOCALES {
        if let Some(rest) = path.strip_prefix('/').and_then(|p| p.strip_prefix(locale)) {
            if rest.is_empty() {
                return HOME_PATH;
            }
            if rest.starts_with('/') {
                return rest;
            }
        }
    }
    path
}

fn is_private(path: &str) -> bool {
    PRIVATE_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Decides whether a page request must be redirected.
///
/// `authenticated` must only be true for a verified, unexpired access token.
pub fn evaluate(path: &str, authenticated: bool) -> GuardDecision {
    if is_exempt(path) {
        return GuardDecision::Continue;
    }

    let path = strip_locale(path);

    if !authenticated && is_private(path) {
        return GuardDecision::Redirect(SIGN_IN_PATH);
    }
    if authenticated && AUTH_PAGES.contains(&path) {
        return GuardDecision::Redirect(HOME_PATH);
    }
    GuardDecision::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_locale_segment_only() {
        assert_eq!(strip_locale("/en/dashboard"), "/dashboard");
        assert_eq!(strip_locale("/vi"), "/");
        assert_eq!(strip_locale("/envelope"), "/envelope");
        assert_eq!(strip_locale("/fr/dashboard"), "/fr/dashboard");
    }

    #[test]
    fn anonymous_private_page_goes_to_signin() {
        assert_eq!(evaluate("/dashboard", false), GuardDecision::Redirect("/signin"));
        assert_eq!(evaluate("/vi/notifications", false), GuardDecision::Redirect("/signin"));
        assert_eq!(evaluate("/admin/users", false), GuardDecision::Redirect("/signin"));
    }

    #[test]
    fn signed_in_private_page_continues() {
        assert_eq!(evaluate("/en/dashboard", true), GuardDecision::Continue);
    }

    #[test]
    fn signed_in_auth_page_goes_home() {
        assert_eq!(evaluate("/signin", true), GuardDecision::Redirect("/"));
        assert_eq!(evaluate("/en/signup", true), GuardDecision::Redirect("/"));
        assert_eq!(evaluate("/signin/help", true), GuardDecision::Continue);
    }

    #[test]
    fn anonymous_auth_page_continues() {
        assert_eq!(evaluate("/signin", false), GuardDecision::Continue);
    }

    #[test]
    fn exempt_paths_are_ignored() {
        assert_eq!(evaluate("/api/notifications", false), GuardDecision::Continue);
        assert_eq!(evaluate("/_next/static/chunk", false), GuardDecision::Continue);
        assert_eq!(evaluate("/dashboard/logo.png", false), GuardDecision::Continue);
        assert_eq!(evaluate("/profile/ada", false), GuardDecision::Continue);
    }
}
