//! Defines the core rendering trait and context for converting predicates to SQL.

use crate::{ast::predicate::SqlPredicate, dialect::Dialect};
use chrono::{FixedOffset, Offset, TimeDelta, Utc};
use model::Value;
use serde::Serialize;
use tracing::warn;

pub mod predicate;

/// A trait for any AST node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// SQL text and the parameters to bind to its placeholders, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<Value>,
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the SQL string and the parameters, and provides
/// access to the dialect for syntax-specific details.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Value>,
    pub dialect: &'a dyn Dialect,
    zone_offset: FixedOffset,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
            zone_offset: utc(),
        }
    }

    /// Offset that zone-less date-times are assumed to be in. They are bound
    /// as UTC instants.
    pub fn with_zone_offset(mut self, zone_offset: FixedOffset) -> Self {
        self.zone_offset = zone_offset;
        self
    }

    /// Consumes the renderer and returns the final SQL string and parameters.
    pub fn finish(self) -> SqlFragment {
        SqlFragment {
            sql: self.sql,
            params: self.params,
        }
    }

    pub fn add_param(&mut self, value: Value) {
        let value = match value {
            Value::DateTime(local) => {
                let offset = TimeDelta::seconds(i64::from(self.zone_offset.local_minus_utc()));
                match local.checked_sub_signed(offset) {
                    Some(instant) => Value::Timestamp(instant.and_utc()),
                    None => {
                        warn!("Date-time {} is out of range at offset {}; bound as is", local, self.zone_offset);
                        Value::DateTime(local)
                    }
                }
            }
            other => other,
        };

        self.params.push(value);
        let placeholder = self.dialect.get_placeholder(self.params.len() - 1);
        self.sql.push_str(&placeholder);
    }

    pub fn add_column(&mut self, column: &str) {
        let quoted = self.dialect.quote_identifier(column);
        self.sql.push_str(&quoted);
    }
}

impl SqlPredicate {
    pub fn render(&self, dialect: &dyn Dialect) -> SqlFragment {
        self.render_with_offset(dialect, utc())
    }

    pub fn render_with_offset(&self, dialect: &dyn Dialect, zone_offset: FixedOffset) -> SqlFragment {
        let mut renderer = Renderer::new(dialect).with_zone_offset(zone_offset);
        Render::render(self, &mut renderer);
        renderer.finish()
    }
}

pub(crate) fn utc() -> FixedOffset {
    Utc.fix()
}
