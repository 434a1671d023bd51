use serde::Serialize;
use crate::models::User;

/// Balances derived from a loaded user. Nothing is clamped, so overspent
/// categories and totals come out negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_budget: f64,  // the user's monthly salary
    pub total_spent: f64,
    pub total_remaining: f64,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub name: String,
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
}

impl Summary {
    pub fn of(user: &User) -> Self {
        let categories: Vec<CategorySummary> = user
            .expense_chart
            .iter()
            .map(|(name, category)| CategorySummary {
                name: name.clone(),
                budget: category.budget,
                spent: category.spent,
                remaining: category.budget - category.spent,
            })
            .collect();

        let total_spent = categories.iter().map(|c| c.spent).sum::<f64>();

        Self {
            total_budget: user.monthly_salary,
            total_spent,
            total_remaining: user.monthly_salary - total_spent,
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn sample_user() -> User {
        let mut user = User::new("Alice", "hash".into());
        user.monthly_salary = 200.0;
        user.expense_chart.insert("A".into(), Category::new(100.0, 40.0));
        user.expense_chart.insert("B".into(), Category::new(50.0, 60.0));
        user
    }

    #[test]
    fn test_summary_totals() {
        let summary = Summary::of(&sample_user());
        assert_eq!(summary.total_spent, 100.0);
        assert_eq!(summary.total_remaining, 100.0);
        assert_eq!(summary.categories[0].remaining, 60.0);
        assert_eq!(summary.categories[1].name, "B");
        assert_eq!(summary.categories[1].remaining, -10.0);
    }

    #[test]
    fn test_summary_is_repeatable() {
        let user = sample_user();
        let first = Summary::of(&user);
        let second = Summary::of(&user);
        assert_eq!(first, second);
        assert_eq!(user, sample_user());
    }

    #[test]
    fn test_empty_chart() {
        let mut user = User::new("Bob", "hash".into());
        user.monthly_salary = 50.0;
        let summary = Summary::of(&user);
        assert!(summary.categories.is_empty());
        assert_eq!(summary.total_spent, 0.0);
        assert_eq!(summary.total_remaining, 50.0);
    }

    #[test]
    fn test_overspending_goes_negative() {
        let mut user = User::new("Cy", "hash".into());
        user.expense_chart.insert("Rent".into(), Category::new(900.0, 950.0));
        let summary = Summary::of(&user);
        assert_eq!(summary.total_remaining, -950.0);
    }

    #[test]
    fn test_summary_json_fields() {
        let value = serde_json::to_value(Summary::of(&sample_user())).unwrap();
        assert_eq!(value["totalBudget"], 200.0);
        assert_eq!(value["totalSpent"], 100.0);
        assert!(value.get("monthlySalary").is_none());
    }
}
