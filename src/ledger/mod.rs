//! Ledger operations: signup, login, budget categories and expenses.
//!
//! Every operation takes the caller's [`UserId`] explicitly; the ledger keeps
//! no session state of its own. Store failures are returned as they happen and
//! never retried, and a failed operation leaves already-written fields as they
//! are.

use chrono::NaiveDate;
use serde_json::{json, Map};
use std::sync::Arc;
use crate::errors::{LedgerError, LedgerResult};
use crate::models::{Category, ExpenseEntry, User, UserId};
use crate::store::{DocumentStore, StorePath};

pub mod summary;

pub use summary::Summary;

const USERS: &str = "users";
const EXPENSE_CHART: &str = "expenseChart";

/// Result of [`Ledger::record_expense`].
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseOutcome {
    /// The entry was appended; `spent` is the category's new total.
    Recorded { spent: f64 },
    /// The category does not exist. Nothing was written.
    UnknownCategory,
}

#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn DocumentStore>,
    bcrypt_cost: u32,
}

fn user_path(user_id: &UserId) -> StorePath {
    StorePath::root(USERS).child(user_id.as_str())
}

fn category_path(user_id: &UserId, category: &str) -> StorePath {
    user_path(user_id).child(EXPENSE_CHART).child(category)
}

impl Ledger {
    pub fn new(store: Arc<dyn DocumentStore>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// Creates a user keyed by the lower-cased `username`.
    pub async fn create_user(&self, username: &str, password: &str) -> LedgerResult<UserId> {
        let user_id = UserId::from_username(username);
        let path = user_path(&user_id);

        if self.store.get(&path).await?.is_some() {
            tracing::info!("Signup rejected, user {} already exists", user_id);
            return Err(LedgerError::AlreadyExists(user_id.to_string()));
        }

        let password_hash = bcrypt::hash(password, self.bcrypt_cost)?;
        let user = User::new(username, password_hash);
        self.store.set(&path, serde_json::to_value(&user)?).await?;

        tracing::info!("Created user {}", user_id);
        Ok(user_id)
    }

    /// Returns the stored user when `password` matches. An unknown user and a
    /// wrong password fail the same way.
    pub async fn authenticate_user(&self, username: &str, password: &str) -> LedgerResult<User> {
        let user_id = UserId::from_username(username);

        let Some(document) = self.store.get(&user_path(&user_id)).await? else {
            tracing::info!("Login failed for {}", user_id);
            return Err(LedgerError::NotAuthenticated);
        };
        let user: User = serde_json::from_value(document)?;

        // A malformed stored hash is treated like a wrong password.
        if bcrypt::verify(password, &user.password_hash).unwrap_or(false) {
            tracing::info!("Login succeeded for {}", user_id);
            Ok(user)
        } else {
            tracing::info!("Login failed for {}", user_id);
            Err(LedgerError::NotAuthenticated)
        }
    }

    pub async fn load_user(&self, user_id: &UserId) -> LedgerResult<User> {
        let document = self
            .store
            .get(&user_path(user_id))
            .await?
            .ok_or_else(|| LedgerError::NotFound(user_id.to_string()))?;
        Ok(serde_json::from_value(document)?)
    }

    pub async fn set_monthly_salary(&self, user_id: &UserId, salary: f64) -> LedgerResult<()> {
        let path = user_path(user_id);
        if self.store.get(&path).await?.is_none() {
            tracing::warn!("Cannot set salary, user {} not found", user_id);
            return Err(LedgerError::NotFound(user_id.to_string()));
        }

        let mut fields = Map::new();
        fields.insert("monthlySalary".into(), json!(salary));
        self.store.update(&path, fields).await?;

        tracing::info!("Set monthly salary of {} to {}", user_id, salary);
        Ok(())
    }

    /// Writes `{budget, spent}` at the category, replacing the whole node.
    /// Redefining an existing category therefore resets it and drops its log.
    pub async fn define_category(
        &self,
        user_id: &UserId,
        category: &str,
        budget: f64,
        spent: f64,
    ) -> LedgerResult<()> {
        if category.trim().is_empty() {
            tracing::warn!("Rejected empty category name for {}", user_id);
            return Err(LedgerError::Validation("Category name cannot be empty.".into()));
        }
        if self.store.get(&user_path(user_id)).await?.is_none() {
            tracing::warn!("Cannot define category, user {} not found", user_id);
            return Err(LedgerError::NotFound(user_id.to_string()));
        }

        let node = Category::new(budget, spent);
        self.store
            .set(&category_path(user_id, category), serde_json::to_value(&node)?)
            .await?;

        tracing::info!("Defined category {:?} for {} with budget {}", category, user_id, budget);
        Ok(())
    }

    /// Adds `amount` to the category's `spent` and appends a log entry, as a
    /// single partial update of those two fields. The read and the write are
    /// not atomic with respect to other sessions.
    pub async fn record_expense(
        &self,
        user_id: &UserId,
        category: &str,
        amount: f64,
        date: NaiveDate,
    ) -> LedgerResult<ExpenseOutcome> {
        let document = self
            .store
            .get(&user_path(user_id))
            .await?
            .ok_or_else(|| {
                tracing::warn!("Cannot record expense, user {} not found", user_id);
                LedgerError::NotFound(user_id.to_string())
            })?;

        // Only the targeted category is decoded; siblings are left alone.
        let Some(node) = document.get(EXPENSE_CHART).and_then(|chart| chart.get(category)) else {
            tracing::warn!("Ignoring expense for unknown category {:?} of {}", category, user_id);
            return Ok(ExpenseOutcome::UnknownCategory);
        };
        let mut entry: Category = serde_json::from_value(node.clone())?;

        entry.spent += amount;
        entry.log.push(ExpenseEntry { amount, date });

        let mut fields = Map::new();
        fields.insert("spent".into(), json!(entry.spent));
        fields.insert("log".into(), serde_json::to_value(&entry.log)?);
        self.store.update(&category_path(user_id, category), fields).await?;

        tracing::info!("Recorded {} on {} in {:?} for {}", amount, date, category, user_id);
        Ok(ExpenseOutcome::Recorded { spent: entry.spent })
    }
}
