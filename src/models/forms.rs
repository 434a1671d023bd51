use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct SalaryForm {
    pub monthly_salary: f64,
}

#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub category: String,
    pub budget: f64,
}

#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
}

// Flash messages carried in the query string after a redirect.
#[derive(Debug, Deserialize, Default)]
pub struct Notice {
    pub error: Option<String>,
    pub message: Option<String>,
}
