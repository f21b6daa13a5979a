use log::debug;

/// where unauthenticated visitors of a protected route are sent
pub(crate) const LOGIN_PATH: &str = "/manager/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Guard {
    Allow,
    Redirect(&'static str),
}

/// Let the protected subtree render when a non-empty token is stored.
pub(crate) fn protect(token: Option<&str>) -> Guard {
    match token {
        Some(token) if !token.is_empty() => Guard::Allow,
        _ => {
            debug!("no access token, redirecting to {}", LOGIN_PATH);
            Guard::Redirect(LOGIN_PATH)
        }
    }
}
