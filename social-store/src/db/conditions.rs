use rusqlite::types::Value;

/// One named `WHERE` predicate and the values bound to its `?` placeholders
#[derive(Debug, Clone)]
pub struct Condition {
    pub name: &'static str,
    pub sql: String,
    pub params: Vec<Value>,
}

/// Predicates joined with `AND`, with parameters kept in placeholder order
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    items: Vec<Condition>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<I>(&mut self, name: &'static str, sql: impl Into<String>, params: I)
    where
        I: IntoIterator<Item = Value>,
    {
        self.items.push(Condition {
            name,
            sql: sql.into(),
            params: params.into_iter().collect(),
        });
    }

    /// Add a predicate only when `enabled`
    pub fn push_if<I>(&mut self, enabled: bool, name: &'static str, sql: impl Into<String>, params: I)
    where
        I: IntoIterator<Item = Value>,
    {
        if enabled {
            self.push(name, sql, params);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.items.iter().map(|c| c.name).collect()
    }

    /// `WHERE a AND b ...`, or an empty string when there is nothing to filter
    pub fn where_clause(&self) -> String {
        if self.items.is_empty() {
            return String::new();
        }
        let joined = self
            .items
            .iter()
            .map(|c| format!("({})", c.sql))
            .collect::<Vec<_>>()
            .join(" AND ");
        format!("WHERE {}", joined)
    }

    /// All bound values, in the order their placeholders appear
    pub fn params(&self) -> Vec<Value> {
        self.items
            .iter()
            .flat_map(|c| c.params.iter().cloned())
            .collect()
    }
}
