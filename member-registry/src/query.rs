//! Filtered member queries
//!
//! Every filter value is bound as a parameter; only column names from
//! this crate are ever pushed as SQL text.

use crate::models::{Member, SearchFilters};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{Postgres, QueryBuilder};

pub const MEMBER_COLUMNS: &str = "id, first_name, last_name, date_of_birth, gender, \
     social_security_number, address, city, state, zip_code, phone_number, email, \
     emergency_contact_name, emergency_contact_phone, blood_type, allergies, \
     medical_conditions, medications, insurance_provider, insurance_policy_number, \
     primary_care_physician, created_at, updated_at";

pub const SUMMARY_COLUMNS: &str = "id, first_name, last_name, date_of_birth, \
     social_security_number, address, city, zip_code, phone_number, email, \
     emergency_contact_name, primary_care_physician";

/// Case-insensitive name order with byte-wise tie-breaks, independent of the
/// database collation
pub const NAME_ORDER: &str = r#"LOWER(last_name) COLLATE "C" ASC, last_name COLLATE "C" ASC, LOWER(first_name) COLLATE "C" ASC, first_name COLLATE "C" ASC, id ASC"#;

/// Builder over a base query that already ends in a `WHERE` clause
///
/// ```rust
/// use member_registry::query::MemberQuery;
///
/// let mut query = MemberQuery::new("SELECT id FROM members WHERE 1=1");
/// query
///     .filter_name_contains(&["first_name", "last_name"], Some("jo"))
///     .filter_eq("id", Some(7))
///     .order_by_name();
/// assert!(query.sql().ends_with("id ASC"));
/// ```
pub struct MemberQuery<'a> {
    query: QueryBuilder<'a, Postgres>,
}

impl<'a> MemberQuery<'a> {
    pub fn new(base_query: impl Into<String>) -> Self {
        Self {
            query: QueryBuilder::new(base_query),
        }
    }

    /// Search query for `filters` ordered by name
    pub fn search(filters: &SearchFilters) -> Self {
        let mut query = Self::new(format!("SELECT {} FROM members WHERE 1=1", MEMBER_COLUMNS));
        query
            .filter_name_contains(&["first_name", "last_name"], filters.name.as_deref())
            .filter_eq("date_of_birth", filters.date_of_birth)
            .filter_eq("id", filters.id)
            .filter_eq("phone_number", filters.phone_number.clone())
            .order_by_name();
        query
    }

    /// Add an equality filter (only if value is Some)
    pub fn filter_eq<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + Send + Sync + 'a,
    {
        if let Some(val) = value {
            self.query.push(format!(" AND {} = ", column));
            self.query.push_bind(val);
        }
        self
    }

    /// Case-insensitive literal substring match against any of `columns`
    pub fn filter_name_contains(&mut self, columns: &[&str], value: Option<&str>) -> &mut Self {
        let Some(value) = value else {
            return self;
        };
        if columns.is_empty() {
            return self;
        }

        let pattern = format!("%{}%", escape_like(&value.to_lowercase()));
        self.query.push(" AND (");
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                self.query.push(" OR ");
            }
            self.query.push(format!("LOWER({}) LIKE ", column));
            self.query.push_bind(pattern.clone());
            self.query.push(" ESCAPE '\\'");
        }
        self.query.push(")");
        self
    }

    pub fn order_by_name(&mut self) -> &mut Self {
        self.query.push(" ORDER BY ");
        self.query.push(NAME_ORDER);
        self
    }

    pub fn build_query_as(&mut self) -> QueryAs<'_, Postgres, Member, PgArguments> {
        self.query.build_query_as()
    }

    pub fn sql(&self) -> &str {
        self.query.sql()
    }
}

/// Escape `%`, `_` and the escape character itself for use inside LIKE
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_no_filters_selects_everything_in_name_order() {
        let query = MemberQuery::search(&SearchFilters::default());
        assert!(query.sql().starts_with("SELECT id, first_name"));
        assert!(query
            .sql()
            .contains(r#"FROM members WHERE 1=1 ORDER BY LOWER(last_name) COLLATE "C" ASC, last_name COLLATE "C" ASC"#));
        assert!(!query.sql().contains("$1"));
    }

    #[test]
    fn test_all_filters_are_bound() {
        let filters = SearchFilters {
            name: Some("Jo".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 1),
            id: Some(3),
            phone_number: Some("555-0100".to_string()),
        };
        let query = MemberQuery::search(&filters);
        let sql = query.sql();

        assert!(sql.contains("(LOWER(first_name) LIKE $1 ESCAPE '\\' OR LOWER(last_name) LIKE $2 ESCAPE '\\')"));
        assert!(sql.contains("AND date_of_birth = $3"));
        assert!(sql.contains("AND id = $4"));
        assert!(sql.contains("AND phone_number = $5"));
        assert!(!sql.contains("Jo"));
        assert!(!sql.contains("555-0100"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("jo"), "jo");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }
}
