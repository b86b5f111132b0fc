use compiler::{QueryError, QueryResult};
use model::Schema;
use std::collections::{HashMap, HashSet};

/// Query field name to SQL column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMappings {
    columns: HashMap<String, String>,
}

impl NameMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit `(field, column)` pairs.
    pub fn from_pairs<F, C>(pairs: impl IntoIterator<Item = (F, C)>) -> Self
    where
        F: Into<String>,
        C: Into<String>,
    {
        Self {
            columns: pairs
                .into_iter()
                .map(|(field, column)| (field.into(), column.into()))
                .collect(),
        }
    }

    /// Derives a snake_case column for each field name.
    pub fn for_fields<S: AsRef<str>>(fields: impl IntoIterator<Item = S>) -> Self {
        Self::for_fields_with(fields, &HashSet::new(), &HashMap::new())
    }

    /// Like [`NameMappings::for_fields`], skipping `ignored` fields and taking
    /// the column from `overrides` where one is given. Overrides for fields
    /// not in `fields` are kept as well.
    pub fn for_fields_with<S: AsRef<str>>(
        fields: impl IntoIterator<Item = S>,
        ignored: &HashSet<String>,
        overrides: &HashMap<String, String>,
    ) -> Self {
        let mut columns = overrides.clone();
        for field in fields {
            let field = field.as_ref();
            if ignored.contains(field) {
                continue;
            }
            columns
                .entry(field.to_string())
                .or_insert_with(|| column_name(field));
        }

        Self { columns }
    }

    /// Uses each field's `column` when set, snake_case otherwise.
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            columns: schema
                .fields
                .iter()
                .map(|f| {
                    let column = f.column.clone().unwrap_or_else(|| column_name(&f.name));
                    (f.name.clone(), column)
                })
                .collect(),
        }
    }

    pub fn with(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(field.into(), column.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.columns.get(field).map(String::as_str)
    }

    pub fn column(&self, field: &str) -> QueryResult<&str> {
        self.get(field).ok_or_else(|| QueryError::unknown_field(field))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// `createdAt` becomes `created_at`.
pub fn column_name(field: &str) -> String {
    let mut column = String::with_capacity(field.len() + 4);
    for c in field.chars() {
        if c.is_uppercase() {
            column.push('_');
            column.extend(c.to_lowercase());
        } else {
            column.push(c);
        }
    }
    column
}
