mod auth;
mod budget;
mod dashboard;
mod expenses;

pub use auth::{serve_login_page, handle_login, handle_register, handle_logout};
pub use budget::{serve_budget_page, handle_save_salary, handle_add_category};
pub use dashboard::{serve_dashboard, serve_summary};
pub use expenses::{serve_expense_page, handle_add_expense};

use axum::response::Html;
use tower_sessions::Session;
use crate::errors::{AppError, AppResult};
use crate::models::{Notice, UserId};

// Session key holding the logged-in UserId.
pub const SESSION_USER_KEY: &str = "user_id";

// Reads the logged-in user from the session; every ledger call is given this id.
async fn current_user(session: &Session) -> AppResult<UserId> {
    session
        .get::<UserId>(SESSION_USER_KEY)
        .await?
        .ok_or_else(|| AppError::Auth("Not authenticated".into()))
}

// Loads templates/<name> and substitutes each {{key}}.
fn render_template(name: &str, values: &[(&str, String)]) -> AppResult<Html<String>> {
    let template = std::fs::read_to_string(format!("templates/{}", name)).map_err(|e| {
        tracing::error!("Failed to read template {}: {}", name, e);
        AppError::File(e)
    })?;

    let html = values.iter().fold(template, |html, (key, value)| {
        html.replace(&format!("{{{{{}}}}}", key), value)
    });
    Ok(Html(html))
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn notice_html(notice: &Notice) -> String {
    let mut html = String::new();
    if let Some(error) = &notice.error {
        html.push_str(&format!(r#"<div class="notice error">{}</div>"#, escape_html(error)));
    }
    if let Some(message) = &notice.message {
        html.push_str(&format!(r#"<div class="notice success">{}</div>"#, escape_html(message)));
    }
    html
}

fn money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", -value)
    } else {
        format!("${:.2}", value)
    }
}

// Amount inputs must be non-negative numbers, like the form widgets enforce.
fn validate_amount(field: &str, value: f64) -> AppResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        tracing::warn!("Rejected {} value {}", field, value);
        Err(AppError::Input(format!("{} must be a non-negative number", field)))
    }
}
