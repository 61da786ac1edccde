//! API models: entities and request/response payloads

pub mod budget;
pub mod category;
pub mod goal;
pub mod settings;
pub mod transaction;
pub mod user;

// Re-export for convenience
pub use budget::{BudgetResponse, NewBudget, UpdateBudget};
pub use category::{Category, EntryType, NewCategory, UpdateCategory};
pub use goal::{Goal, NewGoal, UpdateGoal};
pub use settings::{
    IncomeSetting, Profile, ProfileUpdate, UpdateIncomeSetting, UpdateUserSettings, UserSettings,
};
pub use transaction::{
    MonthlySummary, NewTransaction, TransactionResponse, UpdateTransaction,
};
pub use user::{LoginCredentials, NewUser, User};
