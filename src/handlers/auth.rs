use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Response, Redirect},
};
use tower_sessions::Session;
use crate::config::Config;
use crate::errors::{response::{redirect_with_error, redirect_with_message}, AppResult};
use crate::ledger::Ledger;
use crate::models::{LoginForm, Notice, RegisterForm, UserId};
use super::{notice_html, render_template, SESSION_USER_KEY};

pub async fn serve_login_page(Query(notice): Query<Notice>) -> AppResult<Html<String>> {
    render_template("login.html", &[("notice", notice_html(&notice))])
}

#[axum::debug_handler]
pub async fn handle_login(
    State((ledger, _)): State<(Ledger, Config)>,
    session: Session,
    Form(login_form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for user: {}", login_form.username);

    let user = ledger
        .authenticate_user(&login_form.username, &login_form.password)
        .await?;

    session
        .insert(SESSION_USER_KEY, UserId::from_username(&user.username))
        .await?;
    Ok(Redirect::to("/dashboard").into_response())
}

pub async fn handle_register(
    State((ledger, _)): State<(Ledger, Config)>,
    Form(register_form): Form<RegisterForm>,
) -> AppResult<Response> {
    if register_form.password != register_form.confirm_password {
        return Ok(Redirect::to("/?error=Passwords%20don't%20match&form=register").into_response());
    }
    if register_form.username.trim().is_empty() {
        return Ok(redirect_with_error("/", "Username cannot be empty."));
    }

    ledger
        .create_user(&register_form.username, &register_form.password)
        .await?;

    Ok(redirect_with_message("/", "Account created successfully! Please log in."))
}

#[axum::debug_handler]
pub async fn handle_logout(
    session: Session,
) -> Response {
    if let Err(e) = session.flush().await {
        tracing::warn!("Session removal error: {}", e);
    }
    Redirect::to("/").into_response()
}
