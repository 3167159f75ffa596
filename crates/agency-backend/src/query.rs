//! Collection query: resource name, equality filters, ordering

use std::fmt;

/// Column ordering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Column name
    pub column: String,
    /// Ascending if true
    pub ascending: bool,
}

impl Order {
    /// Ascending order on a column
    #[inline]
    #[must_use]
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    /// Descending order on a column
    #[inline]
    #[must_use]
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }
}

/// Request for one backend collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
    /// Resource (table) name
    pub resource: String,
    /// `column = value` filters, all of which must hold
    pub equals: Vec<(String, String)>,
    /// Optional ordering
    pub order: Option<Order>,
}

impl CollectionQuery {
    /// Query every row of a resource
    #[inline]
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            equals: Vec::new(),
            order: None,
        }
    }

    /// With equality filter
    #[inline]
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.equals.push((column.into(), value.into()));
        self
    }

    /// With ordering
    #[inline]
    #[must_use]
    pub fn order_by(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    /// PostgREST query-string pairs
    ///
    /// `select=*`, then `column=eq.value` per filter, then
    /// `order=column.asc|desc`.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];
        for (column, value) in &self.equals {
            pairs.push((column.clone(), format!("eq.{value}")));
        }
        if let Some(order) = &self.order {
            let direction = if order.ascending { "asc" } else { "desc" };
            pairs.push(("order".to_string(), format!("{}.{direction}", order.column)));
        }
        pairs
    }
}

impl fmt::Display for CollectionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource)?;
        for (column, value) in &self.equals {
            write!(f, " {column}={value}")?;
        }
        if let Some(order) = &self.order {
            let direction = if order.ascending { "asc" } else { "desc" };
            write!(f, " order={}.{direction}", order.column)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_follow_postgrest_dialect() {
        let query = CollectionQuery::new("jobs")
            .eq("status", "open")
            .order_by(Order::desc("created_at"));
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("select".to_string(), "*".to_string()),
                ("status".to_string(), "eq.open".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn display_is_compact() {
        let query = CollectionQuery::new("faqs").order_by(Order::asc("sort_order"));
        assert_eq!(query.to_string(), "faqs order=sort_order.asc");
    }
}
