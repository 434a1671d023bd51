use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Primary key of a user record: the lower-cased username.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn from_username(username: &str) -> Self {
        Self(username.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,       // display name, original case
    pub password_hash: String,  // bcrypt, never the plain password
    #[serde(default)]
    pub monthly_salary: f64,
    #[serde(default)]
    pub expense_chart: BTreeMap<String, Category>,
}

impl User {
    pub fn new(username: &str, password_hash: String) -> Self {
        Self {
            username: username.to_string(),
            password_hash,
            monthly_salary: 0.0,
            expense_chart: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Category {
    pub budget: f64,
    #[serde(default)]
    pub spent: f64,
    // Absent until the first expense is recorded.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<ExpenseEntry>,
}

impl Category {
    pub fn new(budget: f64, spent: f64) -> Self {
        Self { budget, spent, log: Vec::new() }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExpenseEntry {
    pub amount: f64,
    pub date: NaiveDate,  // serialized as YYYY-MM-DD
}
