use axum::{
    extract::State,
    response::Html,
    Json,
};
use tower_sessions::Session;
use crate::charts;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ledger::{Ledger, Summary};
use super::{current_user, escape_html, money, render_template};

pub async fn serve_dashboard(
    State((ledger, _)): State<(Ledger, Config)>,
    session: Session,
) -> AppResult<Html<String>> {
    let user_id = current_user(&session).await?;
    tracing::info!("Rendering dashboard for {}", user_id);

    let user = ledger.load_user(&user_id).await?;
    let summary = Summary::of(&user);

    let rows = summary
        .categories
        .iter()
        .map(|c| {
            format!(
                r#"<tr class="{}"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                if c.remaining < 0.0 { "over" } else { "" },
                escape_html(&c.name),
                money(c.budget),
                money(c.spent),
                money(c.remaining),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let charts_html = if summary.categories.is_empty() {
        "<p>No budget entries yet. Please set up a budget in the Setup Budget section.</p>".to_string()
    } else {
        let legend = summary
            .categories
            .iter()
            .enumerate()
            .map(|(i, c)| {
                format!(
                    r#"<li><span class="swatch" style="background:{}"></span>{}</li>"#,
                    charts::palette_hex(i),
                    escape_html(&c.name)
                )
            })
            .collect::<Vec<_>>()
            .join("");
        format!(
            r#"<h3>Budget vs Spent by Category</h3>
<p class="bar-labels">{}</p>
{}
<h3>Budget Allocation by Category</h3>
<ul class="legend">{}</ul>
{}
<h3>Expense Trend Over Time</h3>
{}"#,
            summary.categories.iter().map(|c| escape_html(&c.name)).collect::<Vec<_>>().join(" | "),
            charts::budget_vs_spent(&summary)?,
            legend,
            charts::budget_allocation(&summary)?,
            charts::spending_trend(&user)?,
        )
    };

    render_template(
        "dashboard.html",
        &[
            ("username", escape_html(&user.username)),
            ("total_budget", money(summary.total_budget)),
            ("total_spent", money(summary.total_spent)),
            ("total_remaining", money(summary.total_remaining)),
            ("categories", rows),
            ("charts", charts_html),
        ],
    )
}

pub async fn serve_summary(
    State((ledger, _)): State<(Ledger, Config)>,
    session: Session,
) -> AppResult<Json<Summary>> {
    let user_id = current_user(&session).await?;
    let user = ledger.load_user(&user_id).await?;
    Ok(Json(Summary::of(&user)))
}
