//! Repositories for database operations
//!
//! One repository per entity, each holding a clone of the connection
//! pool. Owner scoping is applied inside the queries themselves
//! (`WHERE id = .. AND user_id = ..`) so that unowned rows are
//! indistinguishable from missing ones.

pub mod budget;
pub mod category;
pub mod goal;
pub mod settings;
pub mod transaction;
pub mod user;

pub use budget::BudgetRepository;
pub use category::CategoryRepository;
pub use goal::GoalRepository;
pub use settings::IncomeSettingRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;
