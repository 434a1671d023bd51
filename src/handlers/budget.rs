use axum::{
    extract::{Form, Query, State},
    response::{Html, Response},
};
use tower_sessions::Session;
use crate::config::Config;
use crate::errors::{response::redirect_with_message, AppResult};
use crate::ledger::Ledger;
use crate::models::{CategoryForm, Notice, SalaryForm};
use super::{current_user, escape_html, money, notice_html, render_template, validate_amount};

pub async fn serve_budget_page(
    State((ledger, _)): State<(Ledger, Config)>,
    session: Session,
    Query(notice): Query<Notice>,
) -> AppResult<Html<String>> {
    let user_id = current_user(&session).await?;
    let user = ledger.load_user(&user_id).await?;

    let categories = user
        .expense_chart
        .iter()
        .map(|(name, c)| {
            format!(
                "<li>{}: budget {}, spent {}</li>",
                escape_html(name),
                money(c.budget),
                money(c.spent)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    render_template(
        "budget.html",
        &[
            ("notice", notice_html(&notice)),
            ("monthly_salary", user.monthly_salary.to_string()),
            ("categories", categories),
        ],
    )
}

pub async fn handle_save_salary(
    State((ledger, _)): State<(Ledger, Config)>,
    session: Session,
    Form(salary_form): Form<SalaryForm>,
) -> AppResult<Response> {
    let user_id = current_user(&session).await?;
    let salary = validate_amount("Monthly salary", salary_form.monthly_salary)?;

    ledger.set_monthly_salary(&user_id, salary).await?;
    Ok(redirect_with_message("/budget", "Monthly salary updated."))
}

pub async fn handle_add_category(
    State((ledger, _)): State<(Ledger, Config)>,
    session: Session,
    Form(category_form): Form<CategoryForm>,
) -> AppResult<Response> {
    let user_id = current_user(&session).await?;
    let budget = validate_amount("Budget", category_form.budget)?;

    ledger
        .define_category(&user_id, &category_form.category, budget, 0.0)
        .await?;

    Ok(redirect_with_message(
        "/budget",
        &format!("Category '{}' added with a budget of {}", category_form.category, budget),
    ))
}
