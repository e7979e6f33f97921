use serde::{Deserialize, Serialize};

/// Direction for ordering feed results by creation time.
///
/// Only these two values ever reach the SQL text, so callers cannot inject
/// arbitrary fragments through the sort parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// SQL keyword for an `ORDER BY` clause
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_any_case() {
        assert_eq!(SortDirection::parse("ASC"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse(" Desc "), Some(SortDirection::Desc));
    }

    #[test]
    fn test_parse_rejects_sql_fragments() {
        assert_eq!(SortDirection::parse("DESC; DROP TABLE posts"), None);
        assert_eq!(SortDirection::parse(""), None);
        assert_eq!(SortDirection::parse("ascending"), None);
    }

    #[test]
    fn test_default_is_newest_first() {
        assert_eq!(SortDirection::default().as_sql(), "DESC");
    }
}
