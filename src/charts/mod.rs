//! Dashboard charts rendered to SVG strings with plotters.
//!
//! Only shapes are drawn, so rendering never needs system fonts. Labels and
//! legends are written by the page around the image, in the same colour order
//! as [`PALETTE`].

use chrono::NaiveDate;
use plotters::prelude::*;
use std::collections::BTreeMap;
use crate::errors::{AppError, AppResult};
use crate::ledger::Summary;
use crate::models::User;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 320;

pub const BUDGET_COLOR: RGBColor = RGBColor(0x4e, 0x79, 0xa7);
pub const SPENT_COLOR: RGBColor = RGBColor(0xe1, 0x57, 0x59);
pub const TREND_COLOR: RGBColor = RGBColor(0x1f, 0x3b, 0x8c);

pub const PALETTE: [RGBColor; 8] = [
    RGBColor(0x4e, 0x79, 0xa7),
    RGBColor(0xf2, 0x8e, 0x2b),
    RGBColor(0xe1, 0x57, 0x59),
    RGBColor(0x76, 0xb7, 0xb2),
    RGBColor(0x59, 0xa1, 0x4f),
    RGBColor(0xed, 0xc9, 0x48),
    RGBColor(0xb0, 0x7a, 0xa1),
    RGBColor(0x9c, 0x75, 0x5f),
];

fn chart_error<E: std::fmt::Display>(err: E) -> AppError {
    tracing::error!("Failed to render chart: {}", err);
    AppError::Chart(err.to_string())
}

pub fn palette_hex(index: usize) -> String {
    let RGBColor(r, g, b) = PALETTE[index % PALETTE.len()];
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Two bars per category, budget then spent.
pub fn budget_vs_spent(summary: &Summary) -> AppResult<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        if !summary.categories.is_empty() {
            let ceiling = summary
                .categories
                .iter()
                .map(|c| c.budget.max(c.spent))
                .fold(1.0, f64::max);

            let mut chart = ChartBuilder::on(&root)
                .margin(10)
                .build_cartesian_2d(0.0..summary.categories.len() as f64, 0.0..ceiling * 1.1)
                .map_err(chart_error)?;

            chart
                .draw_series(summary.categories.iter().enumerate().flat_map(|(i, c)| {
                    let x = i as f64;
                    [
                        Rectangle::new([(x + 0.1, 0.0), (x + 0.45, c.budget.max(0.0))], BUDGET_COLOR.filled()),
                        Rectangle::new([(x + 0.55, 0.0), (x + 0.9, c.spent.max(0.0))], SPENT_COLOR.filled()),
                    ]
                }))
                .map_err(chart_error)?;
        }

        root.present().map_err(chart_error)?;
    }
    Ok(svg)
}

/// Angular share of each category's budget. Categories without a positive
/// budget get no slice; the index is kept so colours match the legend.
pub fn allocation_slices(summary: &Summary) -> Vec<(usize, f64, f64)> {
    let total: f64 = summary.categories.iter().map(|c| c.budget.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = -std::f64::consts::FRAC_PI_2;
    summary
        .categories
        .iter()
        .enumerate()
        .filter(|(_, c)| c.budget > 0.0)
        .map(|(i, c)| {
            let sweep = c.budget / total * std::f64::consts::TAU;
            let slice = (i, start, start + sweep);
            start += sweep;
            slice
        })
        .collect()
}

/// Pie chart of budget allocation.
pub fn budget_allocation(summary: &Summary) -> AppResult<String> {
    let size = HEIGHT;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (size, size)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let center = (size as f64 / 2.0, size as f64 / 2.0);
        let radius = size as f64 / 2.0 - 10.0;

        for (index, from, to) in allocation_slices(summary) {
            let steps = (((to - from) / std::f64::consts::TAU) * 120.0).ceil().max(2.0) as usize;
            let mut points = vec![(center.0 as i32, center.1 as i32)];
            points.extend((0..=steps).map(|step| {
                let angle = from + (to - from) * step as f64 / steps as f64;
                (
                    (center.0 + radius * angle.cos()).round() as i32,
                    (center.1 + radius * angle.sin()).round() as i32,
                )
            }));
            root.draw(&Polygon::new(points, PALETTE[index % PALETTE.len()].filled()))
                .map_err(chart_error)?;
        }

        root.present().map_err(chart_error)?;
    }
    Ok(svg)
}

/// Running total of logged expenses, one point per day with activity.
/// Seeded `spent` amounts have no dates and are not part of the trend.
pub fn cumulative_spending(user: &User) -> Vec<(NaiveDate, f64)> {
    let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for entry in user.expense_chart.values().flat_map(|c| c.log.iter()) {
        *per_day.entry(entry.date).or_insert(0.0) += entry.amount;
    }

    let mut running = 0.0;
    per_day
        .into_iter()
        .map(|(date, amount)| {
            running += amount;
            (date, running)
        })
        .collect()
}

/// Line chart of [`cumulative_spending`] over the logged date range.
pub fn spending_trend(user: &User) -> AppResult<String> {
    let points = cumulative_spending(user);
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        if let Some((first, _)) = points.first() {
            let first = *first;
            let series: Vec<(f64, f64)> = points
                .iter()
                .map(|(date, total)| ((*date - first).num_days() as f64, *total))
                .collect();
            let span = series.last().map(|(x, _)| *x).unwrap_or(0.0).max(1.0);
            let (low, high) = series.iter().fold((0.0_f64, 1.0_f64), |(lo, hi), (_, y)| (lo.min(*y), hi.max(*y)));

            let mut chart = ChartBuilder::on(&root)
                .margin(10)
                .build_cartesian_2d(-0.5..span + 0.5, low * 1.1..high * 1.1)
                .map_err(chart_error)?;

            chart
                .draw_series(LineSeries::new(series.iter().copied(), TREND_COLOR.stroke_width(2)))
                .map_err(chart_error)?;
            chart
                .draw_series(series.iter().map(|point| Circle::new(*point, 4, TREND_COLOR.filled())))
                .map_err(chart_error)?;
        }

        root.present().map_err(chart_error)?;
    }
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseEntry};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn user_with_logs() -> User {
        let mut user = User::new("Alice", "hash".into());
        let mut food = Category::new(300.0, 0.0);
        food.log = vec![
            ExpenseEntry { amount: 20.0, date: date(3) },
            ExpenseEntry { amount: 5.0, date: date(1) },
        ];
        food.spent = 25.0;
        let mut travel = Category::new(100.0, 40.0);
        travel.log = vec![ExpenseEntry { amount: 40.0, date: date(3) }];
        user.expense_chart.insert("Food".into(), food);
        user.expense_chart.insert("Travel".into(), travel);
        user.expense_chart.insert("Savings".into(), Category::new(0.0, 0.0));
        user
    }

    #[test]
    fn test_cumulative_spending_sorts_by_date_and_merges_days() {
        let points = cumulative_spending(&user_with_logs());
        assert_eq!(points, vec![(date(1), 5.0), (date(3), 65.0)]);
    }

    #[test]
    fn test_cumulative_spending_ignores_seeded_totals() {
        let mut user = User::new("Bob", "hash".into());
        user.expense_chart.insert("Rent".into(), Category::new(900.0, 900.0));
        assert!(cumulative_spending(&user).is_empty());
    }

    #[test]
    fn test_allocation_slices_cover_full_circle() {
        let summary = Summary::of(&user_with_logs());
        let slices = allocation_slices(&summary);

        // Savings (index 1 in name order) has no budget and no slice.
        let indices: Vec<usize> = slices.iter().map(|(i, _, _)| *i).collect();
        assert_eq!(indices, vec![0, 2]);

        let swept: f64 = slices.iter().map(|(_, from, to)| to - from).sum();
        assert!((swept - std::f64::consts::TAU).abs() < 1e-9);
        assert!((slices[0].2 - slices[0].1 - 0.75 * std::f64::consts::TAU).abs() < 1e-9);
    }

    #[test]
    fn test_allocation_slices_empty_without_budgets() {
        let summary = Summary::of(&User::new("Cy", "hash".into()));
        assert!(allocation_slices(&summary).is_empty());
    }

    #[test]
    fn test_charts_render_svg() {
        let user = user_with_logs();
        let summary = Summary::of(&user);

        for svg in [
            budget_vs_spent(&summary).unwrap(),
            budget_allocation(&summary).unwrap(),
            spending_trend(&user).unwrap(),
        ] {
            assert!(svg.contains("<svg"));
            assert!(svg.trim_end().ends_with("</svg>"));
        }
    }

    #[test]
    fn test_empty_user_renders_blank_charts() {
        let user = User::new("Dee", "hash".into());
        let summary = Summary::of(&user);
        assert!(budget_vs_spent(&summary).unwrap().contains("<svg"));
        assert!(budget_allocation(&summary).unwrap().contains("<svg"));
        assert!(spending_trend(&user).unwrap().contains("<svg"));
    }

    #[test]
    fn test_palette_hex() {
        assert_eq!(palette_hex(0), "#4e79a7");
        assert_eq!(palette_hex(PALETTE.len()), "#4e79a7");
    }
}
