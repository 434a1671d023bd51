use axum::{
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    extract::Request,
    body::Body,
};
use tower_sessions::Session;
use crate::handlers::SESSION_USER_KEY;
use crate::models::UserId;

fn is_public(path: &str) -> bool {
    path == "/" || path == "/login" || path == "/register" || path.starts_with("/static/")
}

pub async fn require_auth(
    session: Session,
    req: Request<Body>,
    next: Next,
) -> Response {
    if is_public(req.uri().path()) {
        return next.run(req).await;
    }

    match session.get::<UserId>(SESSION_USER_KEY).await {
        Ok(Some(_)) => next.run(req).await,
        _ => Redirect::to("/").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(is_public("/"));
        assert!(is_public("/login"));
        assert!(is_public("/static/style.css"));
        assert!(!is_public("/dashboard"));
        assert!(!is_public("/api/summary"));
        assert!(!is_public("/staticfile"));
    }
}
