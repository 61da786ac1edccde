//! Integration tests for the Spendly repositories
//!
//! These tests exercise the real schema and require a PostgreSQL
//! instance reachable via `DATABASE_URL`. They are ignored by default;
//! run them with `cargo test -- --ignored` against a disposable
//! database.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use api::error::ApiError;
use api::models::{
    EntryType, NewBudget, NewCategory, NewGoal, NewTransaction, NewUser, UpdateUserSettings,
};
use api::repositories::{
    BudgetRepository, CategoryRepository, GoalRepository, IncomeSettingRepository,
    TransactionRepository, UserRepository,
};
use common::database::{DatabaseConfig, init_pool};

async fn test_pool() -> PgPool {
    let config = DatabaseConfig::from_env().expect("DATABASE_URL must be set");
    let pool = init_pool(&config).await.expect("failed to connect");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations failed");
    pool
}

fn unique(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &suffix[..10])
}

fn money(units: i64) -> Decimal {
    Decimal::new(units * 100, 2)
}

async fn create_user(pool: &PgPool, prefix: &str) -> api::models::User {
    let users = UserRepository::new(pool.clone());
    users
        .create(&NewUser {
            username: unique(prefix),
            email: format!("{}@example.com", unique(prefix)),
            password: "correct horse".to_string(),
        })
        .await
        .expect("failed to create user")
}

async fn create_category(pool: &PgPool, kind: EntryType) -> api::models::Category {
    let categories = CategoryRepository::new(pool.clone());
    categories
        .create(&NewCategory {
            name: unique("cat"),
            kind,
        })
        .await
        .expect("failed to create category")
}

#[tokio::test]
#[ignore]
async fn register_then_login_round_trip() {
    let pool = test_pool().await;
    let users = UserRepository::new(pool.clone());

    let username = unique("alice");
    let user = users
        .create(&NewUser {
            username: username.clone(),
            email: "alice@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
        })
        .await
        .unwrap();

    let found = users.find_by_username(&username).await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert!(users.verify_password(&found, "hunter2hunter2").unwrap());
    assert!(!users.verify_password(&found, "wrong password").unwrap());
    // Hashed, never plaintext
    assert_ne!(found.password_hash, "hunter2hunter2");
}

#[tokio::test]
#[ignore]
async fn duplicate_username_conflicts_and_creates_no_row() {
    let pool = test_pool().await;
    let users = UserRepository::new(pool.clone());

    let username = unique("bob");
    let new_user = NewUser {
        username: username.clone(),
        email: "bob@example.com".to_string(),
        password: "swordfish9".to_string(),
    };
    users.create(&new_user).await.unwrap();

    let err = users.create(&new_user).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = $1")
        .bind(&username)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore]
async fn owner_scoping_hides_other_users_rows() {
    let pool = test_pool().await;
    let transactions = TransactionRepository::new(pool.clone());

    let alice = create_user(&pool, "alice").await;
    let mallory = create_user(&pool, "mallory").await;
    let category = create_category(&pool, EntryType::Expense).await;

    let tx = transactions
        .create(
            alice.id,
            &NewTransaction {
                category_id: category.id,
                amount: money(42),
                kind: EntryType::Expense,
                date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
                note: None,
            },
        )
        .await
        .unwrap();

    // Mallory cannot see, update, or delete Alice's transaction
    assert!(
        transactions
            .find_for_user(mallory.id, tx.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        transactions
            .update(mallory.id, tx.id, &Default::default())
            .await
            .unwrap()
            .is_none()
    );
    assert!(!transactions.delete(mallory.id, tx.id).await.unwrap());

    // Alice still can
    assert!(
        transactions
            .find_for_user(alice.id, tx.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
#[ignore]
async fn duplicate_budget_key_conflicts_and_keeps_one_row() {
    let pool = test_pool().await;
    let budgets = BudgetRepository::new(pool.clone());

    let user = create_user(&pool, "carol").await;
    let category = create_category(&pool, EntryType::Expense).await;

    let new_budget = NewBudget {
        category_id: category.id,
        amount: money(500),
        month: 3,
        year: 2024,
    };
    budgets.create(user.id, &new_budget).await.unwrap();

    let err = budgets.create(user.id, &new_budget).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM budgets WHERE user_id = $1 AND category_id = $2",
    )
    .bind(user.id)
    .bind(category.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore]
async fn budget_spent_amount_tracks_expenses_in_period() {
    let pool = test_pool().await;
    let budgets = BudgetRepository::new(pool.clone());
    let transactions = TransactionRepository::new(pool.clone());

    let user = create_user(&pool, "dave").await;
    let food = create_category(&pool, EntryType::Expense).await;

    let budget = budgets
        .create(
            user.id,
            &NewBudget {
                category_id: food.id,
                amount: money(400),
                month: 3,
                year: 2024,
            },
        )
        .await
        .unwrap();
    assert_eq!(budget.spent_amount, Decimal::ZERO);

    for (amount, day) in [(money(120), 5), (money(80), 20)] {
        transactions
            .create(
                user.id,
                &NewTransaction {
                    category_id: food.id,
                    amount,
                    kind: EntryType::Expense,
                    date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                    note: None,
                },
            )
            .await
            .unwrap();
    }
    // Outside the budget month: ignored
    transactions
        .create(
            user.id,
            &NewTransaction {
                category_id: food.id,
                amount: money(999),
                kind: EntryType::Expense,
                date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                note: None,
            },
        )
        .await
        .unwrap();

    let budget = budgets
        .find_for_user(user.id, budget.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(budget.spent_amount, money(200));
}

#[tokio::test]
#[ignore]
async fn monthly_summary_sums_by_kind() {
    let pool = test_pool().await;
    let transactions = TransactionRepository::new(pool.clone());

    let user = create_user(&pool, "erin").await;
    let salary = create_category(&pool, EntryType::Income).await;
    let rent = create_category(&pool, EntryType::Expense).await;

    let entries = [
        (salary.id, EntryType::Income, money(1000)),
        (rent.id, EntryType::Expense, money(300)),
        (rent.id, EntryType::Expense, money(200)),
    ];
    for (category_id, kind, amount) in entries {
        transactions
            .create(
                user.id,
                &NewTransaction {
                    category_id,
                    amount,
                    kind,
                    date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                    note: Some("summary test".to_string()),
                },
            )
            .await
            .unwrap();
    }

    let summary = transactions.monthly_summary(user.id, 3, 2024).await.unwrap();
    assert_eq!(summary.total_income, money(1000));
    assert_eq!(summary.total_expense, money(500));
    assert_eq!(summary.balance, money(500));

    // A month with no transactions is all zeros
    let empty = transactions.monthly_summary(user.id, 1, 2020).await.unwrap();
    assert_eq!(empty.total_income, Decimal::ZERO);
    assert_eq!(empty.total_expense, Decimal::ZERO);
    assert_eq!(empty.balance, Decimal::ZERO);
}

#[tokio::test]
#[ignore]
async fn seeding_is_idempotent() {
    let pool = test_pool().await;
    let categories = CategoryRepository::new(pool.clone());

    // A disposable catalogue so the test does not depend on whether
    // the shipped one was already seeded
    let catalogue: Vec<(String, EntryType)> = vec![
        (unique("seed"), EntryType::Income),
        (unique("seed"), EntryType::Expense),
        (unique("seed"), EntryType::Expense),
    ];

    let first = categories.create_defaults(&catalogue).await.unwrap();
    assert_eq!(first, 3);

    let second = categories.create_defaults(&catalogue).await.unwrap();
    assert_eq!(second, 0);
}

#[tokio::test]
#[ignore]
async fn income_setting_is_created_lazily_and_upserted() {
    let pool = test_pool().await;
    let income = IncomeSettingRepository::new(pool.clone());

    let user = create_user(&pool, "frank").await;

    let setting = income.get_or_create(user.id).await.unwrap();
    assert_eq!(setting.monthly_income, Decimal::ZERO);

    let setting = income.upsert(user.id, money(3500)).await.unwrap();
    assert_eq!(setting.monthly_income, money(3500));

    let setting = income.get_or_create(user.id).await.unwrap();
    assert_eq!(setting.monthly_income, money(3500));
}

#[tokio::test]
#[ignore]
async fn settings_update_is_partial_and_atomic() {
    let pool = test_pool().await;
    let users = UserRepository::new(pool.clone());

    let user = create_user(&pool, "grace").await;

    let settings = users
        .update_settings(
            user.id,
            &UpdateUserSettings {
                first_name: Some("Grace".to_string()),
                profile: Some(api::models::ProfileUpdate {
                    avatar: Some("avatars/grace.png".to_string()),
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(settings.first_name.as_deref(), Some("Grace"));
    assert_eq!(settings.profile.avatar.as_deref(), Some("avatars/grace.png"));
    // Untouched fields keep their values
    assert_eq!(settings.email, user.email);
}

#[tokio::test]
#[ignore]
async fn delete_account_cascades_but_spares_categories() {
    let pool = test_pool().await;
    let users = UserRepository::new(pool.clone());
    let categories = CategoryRepository::new(pool.clone());
    let transactions = TransactionRepository::new(pool.clone());
    let budgets = BudgetRepository::new(pool.clone());
    let goals = GoalRepository::new(pool.clone());

    let user = create_user(&pool, "heidi").await;
    let category = create_category(&pool, EntryType::Expense).await;

    transactions
        .create(
            user.id,
            &NewTransaction {
                category_id: category.id,
                amount: money(10),
                kind: EntryType::Expense,
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                note: None,
            },
        )
        .await
        .unwrap();
    budgets
        .create(
            user.id,
            &NewBudget {
                category_id: category.id,
                amount: money(100),
                month: 5,
                year: 2024,
            },
        )
        .await
        .unwrap();
    goals
        .create(
            user.id,
            &NewGoal {
                name: "Emergency fund".to_string(),
                target_amount: money(5000),
                saved_amount: None,
                deadline: None,
            },
        )
        .await
        .unwrap();

    // While referenced, the category cannot be deleted
    let err = categories.delete(category.id).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    assert!(users.delete(user.id).await.unwrap());

    for table in ["transactions", "budgets", "goals"] {
        let count: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table} WHERE user_id = $1"))
                .bind(user.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, 0, "{table} should be empty after account deletion");
    }

    // The category survives the cascade and is deletable now
    assert!(
        categories
            .find_by_id(category.id)
            .await
            .unwrap()
            .is_some()
    );
    assert!(categories.delete(category.id).await.unwrap());
}

#[tokio::test]
#[ignore]
async fn goal_saved_amount_defaults_to_zero() {
    let pool = test_pool().await;
    let goals = GoalRepository::new(pool.clone());

    let user = create_user(&pool, "ivan").await;

    let goal = goals
        .create(
            user.id,
            &NewGoal {
                name: "Bicycle".to_string(),
                target_amount: money(800),
                saved_amount: None,
                deadline: NaiveDate::from_ymd_opt(2025, 6, 1),
            },
        )
        .await
        .unwrap();

    assert_eq!(goal.saved_amount, Decimal::ZERO);
    assert_eq!(goal.deadline, NaiveDate::from_ymd_opt(2025, 6, 1));
}
