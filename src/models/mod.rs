mod user;
mod forms;

pub use user::{Category, ExpenseEntry, User, UserId};
pub use forms::{LoginForm, RegisterForm, SalaryForm, CategoryForm, ExpenseForm, Notice};
