//! Queries over serialized data sets.
//!
//! A [`Query`] is a chain of path steps and iteration steps. Evaluating it
//! against a JSON tree yields one [`QueryItem`] per reached value. Every item
//! carries a tracked id that names where it was found, e.g.
//! `vertragskonten_mbas[ouid=1].cbas[ouid=11].vertrag.vertragsnummer`.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{FrameworkError, FrameworkResult};

/// Custom iteration function: returns the children of a value together with
/// a tracking suffix for each of them.
pub type IterFn = dyn for<'v> Fn(&'v Value) -> Result<Vec<(&'v Value, String)>, String> + Send + Sync;

/// How an iteration step enumerates the children of a value.
#[derive(Clone)]
pub enum IterStrategy {
    /// Object entries, tracked as `[label=key]`
    Keyed(String),
    /// Array elements, tracked as `[field=value of field]`
    ByField(String),
    /// Array elements, tracked as `[index]`
    Indexed,
    Custom(Arc<IterFn>),
}

impl IterStrategy {
    pub fn keyed(label: impl Into<String>) -> Self {
        Self::Keyed(label.into())
    }

    pub fn by_field(field: impl Into<String>) -> Self {
        Self::ByField(field.into())
    }

    pub fn custom<F>(function: F) -> Self
    where
        F: for<'v> Fn(&'v Value) -> Result<Vec<(&'v Value, String)>, String> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(function))
    }

    fn children<'v>(&self, value: &'v Value) -> Result<Vec<(&'v Value, String)>, String> {
        match self {
            Self::Keyed(label) => match value {
                Value::Object(map) => Ok(map
                    .iter()
                    .map(|(key, child)| (child, format!("[{}={}]", label, key)))
                    .collect()),
                other => Err(format!("expected an object, found {}", kind_of(other))),
            },
            Self::ByField(field) => match value {
                Value::Array(items) => Ok(items
                    .iter()
                    .map(|child| {
                        let tracked = child.get(field).map(render_scalar).unwrap_or_else(|| "None".to_string());
                        (child, format!("[{}={}]", field, tracked))
                    })
                    .collect()),
                other => Err(format!("expected an array, found {}", kind_of(other))),
            },
            Self::Indexed => match value {
                Value::Array(items) => Ok(items
                    .iter()
                    .enumerate()
                    .map(|(i, child)| (child, format!("[{}]", i)))
                    .collect()),
                other => Err(format!("expected an array, found {}", kind_of(other))),
            },
            Self::Custom(function) => function(value),
        }
    }
}

impl fmt::Debug for IterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyed(label) => write!(f, "Keyed({})", label),
            Self::ByField(field) => write!(f, "ByField({})", field),
            Self::Indexed => write!(f, "Indexed"),
            Self::Custom(_) => write!(f, "Custom"),
        }
    }
}

#[derive(Debug, Clone)]
enum Step {
    Path(Vec<String>),
    Iter(IterStrategy),
}

/// Outcome of resolving a location.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Value),
    /// The location exists but holds `null`
    Null,
    /// A key on the way does not exist
    Absent,
    /// The location could not be iterated
    Invalid(String),
}

/// A single value reached by a query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryItem {
    pub id: String,
    pub lookup: Lookup,
}

/// A chain of path and iteration steps.
#[derive(Debug, Clone, Default)]
pub struct Query {
    steps: Vec<Step>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descend along a dotted path, e.g. `sepa_info.sepa_zahler`.
    pub fn path(mut self, path: &str) -> Self {
        self.steps
            .push(Step::Path(path.split('.').map(str::to_string).collect()));
        self
    }

    /// Enumerate the children of the current value.
    pub fn iter(mut self, strategy: IterStrategy) -> Self {
        self.steps.push(Step::Iter(strategy));
        self
    }

    /// Check that every path step has non-empty segments.
    pub fn check(&self) -> FrameworkResult<()> {
        if self.steps.is_empty() {
            return Err(FrameworkError::InvalidPath("<empty query>".to_string()));
        }
        for step in &self.steps {
            if let Step::Path(segments) = step {
                if segments.iter().any(|s| s.is_empty()) {
                    return Err(FrameworkError::InvalidPath(segments.join(".")));
                }
            }
        }
        Ok(())
    }

    /// Evaluate the query against a JSON tree.
    ///
    /// A branch that runs into a missing or null value stops there and yields
    /// an item whose id ends with the whole path step it was resolving. A
    /// non-iterable value yields an `Invalid` item instead.
    pub fn evaluate(&self, root: &Value) -> Vec<QueryItem> {
        let mut items = Vec::new();
        walk(&self.steps, String::new(), root, &mut items);
        items
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for step in &self.steps {
            match step {
                Step::Path(segments) => {
                    if !first {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", segments.join("."))?;
                }
                Step::Iter(strategy) => write!(f, "[{:?}]", strategy)?,
            }
            first = false;
        }
        Ok(())
    }
}

/// Resolve a dotted path against a JSON tree.
pub(crate) fn resolve_path(root: &Value, path: &str) -> QueryItem {
    let segments: Vec<String> = path.split('.').map(str::to_string).collect();
    let lookup = match descend(root, &segments) {
        Ok(value) => Lookup::Found(value.clone()),
        Err(missing) => missing,
    };
    QueryItem {
        id: path.to_string(),
        lookup,
    }
}

/// Follow the segments of one path step. Stops with `Lookup::Null` or
/// `Lookup::Absent` at the first segment that is not there.
fn descend<'v>(value: &'v Value, segments: &[String]) -> Result<&'v Value, Lookup> {
    segments
        .iter()
        .try_fold(value, |current, segment| match current.get(segment.as_str()) {
            Some(Value::Null) => Err(Lookup::Null),
            Some(next) => Ok(next),
            None => Err(Lookup::Absent),
        })
}

fn walk(steps: &[Step], id: String, value: &Value, out: &mut Vec<QueryItem>) {
    let Some((step, rest)) = steps.split_first() else {
        out.push(QueryItem {
            id,
            lookup: Lookup::Found(value.clone()),
        });
        return;
    };

    match step {
        Step::Path(segments) => {
            let mut id = id;
            append_segment(&mut id, &segments.join("."));
            match descend(value, segments) {
                Ok(current) => walk(rest, id, current, out),
                Err(lookup) => out.push(QueryItem { id, lookup }),
            }
        }
        Step::Iter(strategy) => {
            if value.is_null() {
                out.push(QueryItem { id, lookup: Lookup::Null });
                return;
            }
            match strategy.children(value) {
                Ok(children) => {
                    for (child, suffix) in children {
                        walk(rest, format!("{}{}", id, suffix), child, out);
                    }
                }
                Err(message) => out.push(QueryItem {
                    id,
                    lookup: Lookup::Invalid(message),
                }),
            }
        }
    }
}

fn append_segment(id: &mut String, segment: &str) {
    if !id.is_empty() {
        id.push('.');
    }
    id.push_str(segment);
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
