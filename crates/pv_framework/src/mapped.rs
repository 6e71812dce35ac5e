//! Mapped validators.
//!
//! A mapped validator binds every parameter of a [`Validator`] to a location
//! in the data set and decides how many calls a data set produces:
//!
//! - [`PathMappedValidator`]: one dotted path per parameter, one call
//! - [`QueryMappedValidator`]: one query per parameter, one call per
//!   combination of the yielded values
//! - [`ParallelQueryMappedValidator`]: one query per parameter, the queries
//!   are walked in lockstep

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use serde_json::Value;
use tracing::debug;

use crate::error::{FrameworkError, FrameworkResult};
use crate::query::{resolve_path, Lookup, Query, QueryItem};
use crate::summary::{ErrorKind, Failure};
use crate::validator::{ParamValue, Params, Validator};

/// A validator together with the mapping of its parameters.
#[async_trait]
pub trait MappedValidator<C>: Send + Sync {
    /// Name of the underlying validator.
    fn name(&self) -> &str;

    /// Human-readable description of the parameter mapping.
    fn describe(&self) -> String;

    /// Run the validator against a serialized data set.
    async fn run(&self, data: &Value, context: Arc<C>) -> Vec<Failure>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Path,
    Query,
}

fn check_mapping<C: Send + Sync + 'static>(validator: &Validator<C>, mapped: &[&str]) -> FrameworkResult<()> {
    let mismatch = |message: String| FrameworkError::ParamMismatch {
        validator: validator.name().to_string(),
        message,
    };

    let mut seen = BTreeSet::new();
    for name in mapped {
        if !seen.insert(*name) {
            return Err(mismatch(format!("parameter '{}' is mapped twice", name)));
        }
        if validator.param(name).is_none() {
            return Err(mismatch(format!("unknown parameter '{}'", name)));
        }
    }
    for spec in validator.params() {
        if !seen.contains(spec.name.as_str()) {
            return Err(mismatch(format!("missing mapping for parameter '{}'", spec.name)));
        }
    }
    Ok(())
}

fn render(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() > 80 {
        let truncated: String = rendered.chars().take(77).collect();
        format!("{}...", truncated)
    } else {
        rendered
    }
}

/// Turn extracted items into call arguments, or into failures if a required
/// value is missing or a value has the wrong type.
fn bind<C: Send + Sync + 'static>(
    validator: &Validator<C>,
    items: &[(&str, &QueryItem)],
    mode: Mode,
) -> Result<HashMap<String, ParamValue>, Vec<Failure>> {
    let mut values = HashMap::new();
    let mut failures = Vec::new();

    for (name, item) in items {
        let Some(spec) = validator.param(name) else {
            failures.push(Failure::new(
                ErrorKind::Internal,
                format!("unknown parameter '{}'", name),
            ));
            continue;
        };

        let value = match &item.lookup {
            Lookup::Found(value) => {
                if !spec.accepts(value) {
                    failures.push(Failure::new(
                        ErrorKind::TypeMismatch,
                        format!("{}: {} is not an instance of {}", item.id, render(value), spec.type_name),
                    ));
                    continue;
                }
                Some(value.clone())
            }
            Lookup::Null | Lookup::Absent if !spec.required => None,
            Lookup::Null => {
                let failure = match mode {
                    Mode::Path => Failure::new(
                        ErrorKind::TypeMismatch,
                        format!("{}: None is not an instance of {}", item.id, spec.type_name),
                    ),
                    Mode::Query => Failure::new(ErrorKind::MissingParam, format!("{} not provided", item.id)),
                };
                failures.push(failure);
                continue;
            }
            Lookup::Absent => {
                let message = match mode {
                    Mode::Path => format!("'{}' does not exist", item.id),
                    Mode::Query => format!("{} not provided", item.id),
                };
                failures.push(Failure::new(ErrorKind::MissingParam, message));
                continue;
            }
            Lookup::Invalid(message) => {
                failures.push(Failure::new(
                    ErrorKind::TypeMismatch,
                    format!("{}: {}", item.id, message),
                ));
                continue;
            }
        };

        values.insert(
            name.to_string(),
            ParamValue {
                id: item.id.clone(),
                value,
            },
        );
    }

    if failures.is_empty() {
        Ok(values)
    } else {
        Err(failures)
    }
}

async fn invoke<C: Send + Sync + 'static>(
    validator: &Validator<C>,
    items: Vec<(&str, &QueryItem)>,
    mode: Mode,
    context: Arc<C>,
) -> Vec<Failure> {
    let values = match bind(validator, &items, mode) {
        Ok(values) => values,
        Err(failures) => return failures,
    };

    match validator.call(Params::new(values, context)).await {
        Ok(()) => Vec::new(),
        Err(e) => vec![Failure::new(ErrorKind::Failed, format!("{:#}", e))],
    }
}

/// Maps every parameter to a dotted path.
pub struct PathMappedValidator<C> {
    validator: Validator<C>,
    mapping: Vec<(String, String)>,
}

impl<C: Send + Sync + 'static> PathMappedValidator<C> {
    pub fn new<I, K, V>(validator: Validator<C>, mapping: I) -> FrameworkResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mapping: Vec<(String, String)> = mapping
            .into_iter()
            .map(|(param, path)| (param.into(), path.into()))
            .collect();

        let names: Vec<&str> = mapping.iter().map(|(param, _)| param.as_str()).collect();
        check_mapping(&validator, &names)?;
        for (_, path) in &mapping {
            if path.split('.').any(str::is_empty) {
                return Err(FrameworkError::InvalidPath(path.clone()));
            }
        }

        Ok(Self { validator, mapping })
    }
}

#[async_trait]
impl<C: Send + Sync + 'static> MappedValidator<C> for PathMappedValidator<C> {
    fn name(&self) -> &str {
        self.validator.name()
    }

    fn describe(&self) -> String {
        let params: Vec<String> = self
            .mapping
            .iter()
            .map(|(param, path)| format!("{}={}", param, path))
            .collect();
        format!("{}({})", self.validator.name(), params.join(", "))
    }

    async fn run(&self, data: &Value, context: Arc<C>) -> Vec<Failure> {
        let items: Vec<(&str, QueryItem)> = self
            .mapping
            .iter()
            .map(|(param, path)| (param.as_str(), resolve_path(data, path)))
            .collect();
        let items = items.iter().map(|(param, item)| (*param, item)).collect();

        invoke(&self.validator, items, Mode::Path, context).await
    }
}

fn check_queries<C: Send + Sync + 'static>(
    validator: &Validator<C>,
    mapping: &[(String, Query)],
) -> FrameworkResult<()> {
    let names: Vec<&str> = mapping.iter().map(|(param, _)| param.as_str()).collect();
    check_mapping(validator, &names)?;
    for (_, query) in mapping {
        query.check()?;
    }
    Ok(())
}

fn describe_queries(name: &str, mapping: &[(String, Query)]) -> String {
    let params: Vec<String> = mapping
        .iter()
        .map(|(param, query)| format!("{}={}", param, query))
        .collect();
    format!("{}({})", name, params.join(", "))
}

/// Maps every parameter to a query; calls the validator for every combination
/// of the values the queries yield.
pub struct QueryMappedValidator<C> {
    validator: Validator<C>,
    mapping: Vec<(String, Query)>,
}

impl<C: Send + Sync + 'static> QueryMappedValidator<C> {
    pub fn new<I, K>(validator: Validator<C>, mapping: I) -> FrameworkResult<Self>
    where
        I: IntoIterator<Item = (K, Query)>,
        K: Into<String>,
    {
        let mapping: Vec<(String, Query)> = mapping
            .into_iter()
            .map(|(param, query)| (param.into(), query))
            .collect();
        check_queries(&validator, &mapping)?;
        Ok(Self { validator, mapping })
    }
}

fn cartesian<'a>(lists: &'a [Vec<QueryItem>]) -> Vec<Vec<&'a QueryItem>> {
    let mut combinations: Vec<Vec<&QueryItem>> = vec![Vec::new()];
    for list in lists {
        combinations = combinations
            .into_iter()
            .flat_map(|prefix| {
                list.iter().map(move |item| {
                    let mut combination = prefix.clone();
                    combination.push(item);
                    combination
                })
            })
            .collect();
    }
    combinations
}

#[async_trait]
impl<C: Send + Sync + 'static> MappedValidator<C> for QueryMappedValidator<C> {
    fn name(&self) -> &str {
        self.validator.name()
    }

    fn describe(&self) -> String {
        describe_queries(self.validator.name(), &self.mapping)
    }

    async fn run(&self, data: &Value, context: Arc<C>) -> Vec<Failure> {
        let evaluated: Vec<Vec<QueryItem>> = self
            .mapping
            .iter()
            .map(|(_, query)| query.evaluate(data))
            .collect();

        let combinations = cartesian(&evaluated);
        debug!("{}: {} call(s)", self.validator.name(), combinations.len());

        let calls = combinations.into_iter().map(|combination| {
            let items = self
                .mapping
                .iter()
                .map(|(param, _)| param.as_str())
                .zip(combination)
                .collect();
            invoke(&self.validator, items, Mode::Query, Arc::clone(&context))
        });

        join_all(calls).await.into_iter().flatten().collect()
    }
}

/// Maps every parameter to a query; the i-th values of all queries are
/// passed to the i-th call.
pub struct ParallelQueryMappedValidator<C> {
    validator: Validator<C>,
    mapping: Vec<(String, Query)>,
}

impl<C: Send + Sync + 'static> ParallelQueryMappedValidator<C> {
    pub fn new<I, K>(validator: Validator<C>, mapping: I) -> FrameworkResult<Self>
    where
        I: IntoIterator<Item = (K, Query)>,
        K: Into<String>,
    {
        let mapping: Vec<(String, Query)> = mapping
            .into_iter()
            .map(|(param, query)| (param.into(), query))
            .collect();
        check_queries(&validator, &mapping)?;
        Ok(Self { validator, mapping })
    }
}

#[async_trait]
impl<C: Send + Sync + 'static> MappedValidator<C> for ParallelQueryMappedValidator<C> {
    fn name(&self) -> &str {
        self.validator.name()
    }

    fn describe(&self) -> String {
        describe_queries(self.validator.name(), &self.mapping)
    }

    async fn run(&self, data: &Value, context: Arc<C>) -> Vec<Failure> {
        let evaluated: Vec<Vec<QueryItem>> = self
            .mapping
            .iter()
            .map(|(_, query)| query.evaluate(data))
            .collect();

        let len = evaluated.first().map(Vec::len).unwrap_or(0);
        if evaluated.iter().any(|items| items.len() != len) {
            let counts: Vec<String> = self
                .mapping
                .iter()
                .zip(&evaluated)
                .map(|((param, _), items)| format!("{}={}", param, items.len()))
                .collect();
            return vec![Failure::new(
                ErrorKind::Internal,
                format!("parallel queries yielded unequal numbers of values: {}", counts.join(", ")),
            )];
        }

        let calls = (0..len).map(|i| {
            let items = self
                .mapping
                .iter()
                .zip(&evaluated)
                .map(|((param, _), items)| (param.as_str(), &items[i]))
                .collect();
            invoke(&self.validator, items, Mode::Query, Arc::clone(&context))
        });

        join_all(calls).await.into_iter().flatten().collect()
    }
}
