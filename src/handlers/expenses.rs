use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use crate::config::Config;
use crate::errors::{response::redirect_with_message, AppResult};
use crate::ledger::{ExpenseOutcome, Ledger};
use crate::models::{ExpenseForm, Notice};
use super::{current_user, escape_html, notice_html, render_template, validate_amount};

pub async fn serve_expense_page(
    State((ledger, _)): State<(Ledger, Config)>,
    session: Session,
    Query(notice): Query<Notice>,
) -> AppResult<Html<String>> {
    let user_id = current_user(&session).await?;
    let user = ledger.load_user(&user_id).await?;

    let form = if user.expense_chart.is_empty() {
        "<p>No categories available. Please set up a budget first.</p>".to_string()
    } else {
        let options = user
            .expense_chart
            .keys()
            .map(|name| {
                let name = escape_html(name);
                format!(r#"<option value="{}">{}</option>"#, name, name)
            })
            .collect::<Vec<_>>()
            .join("");
        let today = chrono::Local::now().date_naive().format("%Y-%m-%d");
        format!(
            r#"<form method="post" action="/expenses">
  <label>Category <select name="category">{}</select></label>
  <label>Amount <input type="number" name="amount" min="0" step="0.01" value="0" required></label>
  <label>Date <input type="date" name="date" value="{}" required></label>
  <button type="submit">Add Expense</button>
</form>"#,
            options, today
        )
    };

    render_template(
        "expense.html",
        &[("notice", notice_html(&notice)), ("form", form)],
    )
}

pub async fn handle_add_expense(
    State((ledger, _)): State<(Ledger, Config)>,
    session: Session,
    Form(expense_form): Form<ExpenseForm>,
) -> AppResult<Response> {
    let user_id = current_user(&session).await?;
    let amount = validate_amount("Amount", expense_form.amount)?;

    let outcome = ledger
        .record_expense(&user_id, &expense_form.category, amount, expense_form.date)
        .await?;

    match outcome {
        ExpenseOutcome::Recorded { .. } => Ok(redirect_with_message(
            "/expenses/new",
            &format!("Added expense of {} to {}", amount, expense_form.category),
        )),
        ExpenseOutcome::UnknownCategory => Ok(Redirect::to("/expenses/new").into_response()),
    }
}
