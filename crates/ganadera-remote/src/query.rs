//! # Query Model
//!
//! The small subset of PostgREST reads this registry needs: column
//! selection, `eq` and `in` filters, one ordering and a limit.
//!
//! ```text
//! SelectQuery::all()
//!     .eq("activo", "true")
//!     .order_by("nombre", Direction::Asc)
//!         │
//!         ▼ to_query_pairs()
//! ?select=*&activo=eq.true&order=nombre.asc
//! ```
//!
//! [`SelectQuery::matches`] and [`SelectQuery::apply`] evaluate the same
//! query against JSON rows, for the in-memory store.

use serde_json::Value;
use std::cmp::Ordering;

/// The three remote tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Members,
    Categories,
    Transactions,
}

impl Table {
    /// Remote table name.
    pub fn name(self) -> &'static str {
        match self {
            Table::Members => "socios",
            Table::Categories => "tipos_ganado",
            Table::Transactions => "registros",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column=eq.value`
    Eq { column: String, value: String },
    /// `column=in.(a,b,c)`
    In { column: String, values: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// A filtered, ordered read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub columns: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl SelectQuery {
    /// `select=*` with no filters.
    pub fn all() -> Self {
        SelectQuery {
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn in_list<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(Filter::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query string pairs in PostgREST syntax.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.columns.clone())];

        for filter in &self.filters {
            match filter {
                Filter::Eq { column, value } => {
                    pairs.push((column.clone(), format!("eq.{value}")));
                }
                Filter::In { column, values } => {
                    let list: Vec<String> = values.iter().map(|v| quote_list_value(v)).collect();
                    pairs.push((column.clone(), format!("in.({})", list.join(","))));
                }
            }
        }

        if let Some(order) = &self.order {
            let dir = match order.direction {
                Direction::Asc => "asc",
                Direction::Desc => "desc",
            };
            pairs.push(("order".to_string(), format!("{}.{dir}", order.column)));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }

        pairs
    }

    /// True if `row` passes every filter.
    pub fn matches(&self, row: &Value) -> bool {
        self.filters.iter().all(|filter| match filter {
            Filter::Eq { column, value } => cell_text(row.get(column)) == *value,
            Filter::In { column, values } => {
                let cell = cell_text(row.get(column));
                values.iter().any(|v| *v == cell)
            }
        })
    }

    /// Filters, orders and truncates `rows` the way the service would.
    pub fn apply(&self, rows: impl IntoIterator<Item = Value>) -> Vec<Value> {
        let mut rows: Vec<Value> = rows.into_iter().filter(|row| self.matches(row)).collect();

        if let Some(order) = &self.order {
            rows.sort_by(|a, b| {
                let ord = compare_cells(a.get(&order.column), b.get(&order.column));
                match order.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }

        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }

        if self.columns != "*" {
            let keep: Vec<&str> = self.columns.split(',').map(str::trim).collect();
            for row in &mut rows {
                if let Value::Object(map) = row {
                    map.retain(|key, _| keep.contains(&key.as_str()));
                }
            }
        }

        rows
    }
}

/// PostgREST requires quoting list items that contain reserved characters.
fn quote_list_value(value: &str) -> String {
    if value.contains([',', '(', ')', '"', ' ']) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// Renders a JSON cell the way it appears in a filter value.
fn cell_text(cell: Option<&Value>) -> String {
    match cell {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Nulls sort last in ascending order, as in Postgres.
fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}
