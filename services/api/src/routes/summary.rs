//! Monthly summary route

use axum::{Extension, Json, extract::{Query, State}, response::IntoResponse};
use serde::Deserialize;

use crate::{error::ApiError, middleware::AuthUser, state::AppState};

/// Raw query parameters; both are parsed and validated explicitly so
/// malformed input fails fast with BadRequest instead of a coercion
/// error deeper down
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    pub month: Option<String>,
    pub year: Option<String>,
}

fn parse_period(query: &SummaryQuery) -> Result<(i32, i32), ApiError> {
    let (month, year) = match (&query.month, &query.year) {
        (Some(month), Some(year)) => (month, year),
        _ => {
            return Err(ApiError::BadRequest("month and year required".to_string()));
        }
    };

    let month: i32 = month
        .parse()
        .map_err(|_| ApiError::BadRequest("month must be an integer".to_string()))?;
    let year: i32 = year
        .parse()
        .map_err(|_| ApiError::BadRequest("year must be an integer".to_string()))?;

    if !(1..=12).contains(&month) {
        return Err(ApiError::BadRequest(
            "month must be between 1 and 12".to_string(),
        ));
    }

    Ok((month, year))
}

/// Total income, total expense, and balance for one calendar month of
/// the authenticated user's transactions
pub async fn monthly_summary(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<SummaryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (month, year) = parse_period(&query)?;

    let summary = state
        .transaction_repository
        .monthly_summary(user.id, month, year)
        .await?;

    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(month: Option<&str>, year: Option<&str>) -> SummaryQuery {
        SummaryQuery {
            month: month.map(str::to_string),
            year: year.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_period_happy_path() {
        assert_eq!(
            parse_period(&query(Some("3"), Some("2024"))).unwrap(),
            (3, 2024)
        );
    }

    #[test]
    fn test_parse_period_missing_parameters() {
        assert!(parse_period(&query(None, None)).is_err());
        assert!(parse_period(&query(Some("3"), None)).is_err());
        assert!(parse_period(&query(None, Some("2024"))).is_err());
    }

    #[test]
    fn test_parse_period_non_numeric() {
        assert!(parse_period(&query(Some("march"), Some("2024"))).is_err());
        assert!(parse_period(&query(Some("3"), Some("twenty24"))).is_err());
    }

    #[test]
    fn test_parse_period_month_out_of_range() {
        assert!(parse_period(&query(Some("0"), Some("2024"))).is_err());
        assert!(parse_period(&query(Some("13"), Some("2024"))).is_err());
    }
}
