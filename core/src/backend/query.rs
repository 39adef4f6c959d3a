//! Query and mutation descriptions for the data API.
//!
//! A [`Select`] or [`Update`] is plain data: the HTTP client turns it into
//! PostgREST query parameters with [`Select::params`], and the in-memory
//! backend evaluates it directly.

use serde_json::{Map, Value};

/// Equality filter on one column (`column=eq.value`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

/// Sort order on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// A read from one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    pub collection: String,
    pub fields: Vec<String>,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Select {
    /// Start a query on `collection` selecting every column.
    pub fn table(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            fields: Vec::new(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn columns(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Value of the equality filter on `column`, if any.
    pub fn filter_value(&self, column: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|f| f.column == column)
            .map(|f| f.value.as_str())
    }

    /// PostgREST query parameters, unencoded.
    pub fn params(&self) -> Vec<(String, String)> {
        let select = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields.join(",")
        };
        let mut params = vec![("select".to_string(), select)];
        params.extend(filter_params(&self.filters));
        if let Some(order) = &self.order {
            let direction = if order.ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{}.{}", order.column, direction)));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

/// A write of new column values to the rows matching all filters.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub collection: String,
    pub values: Map<String, Value>,
    pub filters: Vec<Filter>,
}

impl Update {
    pub fn table(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            values: Map::new(),
            filters: Vec::new(),
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    /// PostgREST query parameters (filters only; values go in the body).
    pub fn params(&self) -> Vec<(String, String)> {
        filter_params(&self.filters).collect()
    }

    /// JSON request body.
    pub fn body(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

fn filter_params(filters: &[Filter]) -> impl Iterator<Item = (String, String)> + '_ {
    filters
        .iter()
        .map(|f| (f.column.clone(), format!("eq.{}", f.value)))
}
