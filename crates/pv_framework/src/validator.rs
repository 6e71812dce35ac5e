//! Validators and their parameters.
//!
//! A [`Validator`] couples a validation function with the list of parameters
//! it expects. Mapped validators (see [`crate::mapped`]) decide where the
//! parameter values come from; the validator only sees the extracted values
//! through [`Params`].

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, LazyLock};

use anyhow::{anyhow, bail, Context};
use futures_util::future::BoxFuture;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

static MODULE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z_][a-z0-9_]*::").expect("module path regex is valid"));

/// Shortened `std::any::type_name`, e.g. `DateTime<Utc>` instead of the full path.
fn short_type_name<T: ?Sized>() -> String {
    MODULE_PATH.replace_all(std::any::type_name::<T>(), "").into_owned()
}

fn accepts<T: DeserializeOwned>(value: &Value) -> bool {
    T::deserialize(value).is_ok()
}

/// Declaration of a single validator parameter.
#[derive(Clone)]
pub struct ParamSpec {
    pub name: String,
    pub required: bool,
    pub type_name: String,
    accepts: fn(&Value) -> bool,
}

impl ParamSpec {
    fn new<T: DeserializeOwned>(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            type_name: short_type_name::<T>(),
            accepts: accepts::<T>,
        }
    }

    /// Whether `value` deserializes into the declared parameter type.
    pub fn accepts(&self, value: &Value) -> bool {
        (self.accepts)(value)
    }
}

impl fmt::Debug for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSpec")
            .field("name", &self.name)
            .field("required", &self.required)
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// An extracted parameter value together with the location it came from.
#[derive(Debug, Clone)]
pub struct ParamValue {
    /// Tracked location, e.g. `banks[contract_id=c1].iban`
    pub id: String,
    /// `None` if the location was absent or `null`
    pub value: Option<Value>,
}

/// Arguments for a single validator call.
pub struct Params<C> {
    values: HashMap<String, ParamValue>,
    context: Arc<C>,
}

impl<C> Params<C> {
    pub fn new(values: HashMap<String, ParamValue>, context: Arc<C>) -> Self {
        Self { values, context }
    }

    /// Deserialize a parameter that must be present.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> anyhow::Result<T> {
        let param = self.entry(name)?;
        match &param.value {
            Some(value) => T::deserialize(value)
                .with_context(|| format!("{} is not an instance of {}", param.id, short_type_name::<T>())),
            None => bail!("{} not provided", param.id),
        }
    }

    /// Deserialize a parameter that may be absent or `null`.
    pub fn get_opt<T: DeserializeOwned>(&self, name: &str) -> anyhow::Result<Option<T>> {
        let param = self.entry(name)?;
        match &param.value {
            Some(Value::Null) | None => Ok(None),
            Some(value) => Option::<T>::deserialize(value)
                .with_context(|| format!("{} is not an instance of {}", param.id, short_type_name::<T>())),
        }
    }

    /// The tracked location of a parameter, used to prefix error messages.
    ///
    /// Falls back to the parameter name if the parameter is unknown.
    pub fn param_id<'a>(&'a self, name: &'a str) -> &'a str {
        self.values.get(name).map(|p| p.id.as_str()).unwrap_or(name)
    }

    /// Shared context of the validation manager.
    pub fn context(&self) -> &C {
        &self.context
    }

    fn entry(&self, name: &str) -> anyhow::Result<&ParamValue> {
        self.values
            .get(name)
            .ok_or_else(|| anyhow!("unknown parameter '{}'", name))
    }
}

type SyncFn<C> = dyn Fn(&Params<C>) -> anyhow::Result<()> + Send + Sync;
type AsyncFn<C> = dyn Fn(Params<C>) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync;

/// The function executed by a validator.
pub enum ValidatorFunction<C> {
    Sync(Arc<SyncFn<C>>),
    Async(Arc<AsyncFn<C>>),
}

impl<C> Clone for ValidatorFunction<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Sync(f) => Self::Sync(Arc::clone(f)),
            Self::Async(f) => Self::Async(Arc::clone(f)),
        }
    }
}

/// A named validation function with declared parameters.
///
/// Validators are cheap to clone, so the same validator can be registered
/// under several mappings.
pub struct Validator<C> {
    name: String,
    params: Vec<ParamSpec>,
    function: ValidatorFunction<C>,
}

impl<C> Clone for Validator<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            params: self.params.clone(),
            function: self.function.clone(),
        }
    }
}

impl<C> fmt::Debug for Validator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.function {
            ValidatorFunction::Sync(_) => "sync",
            ValidatorFunction::Async(_) => "async",
        };
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("function", &kind)
            .finish()
    }
}

impl<C: Send + Sync + 'static> Validator<C> {
    /// Create a validator from a synchronous function.
    pub fn new<F>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&Params<C>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params: Vec::new(),
            function: ValidatorFunction::Sync(Arc::new(function)),
        }
    }

    /// Create a validator from an asynchronous function.
    pub fn new_async<F, Fut>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(Params<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            params: Vec::new(),
            function: ValidatorFunction::Async(Arc::new(move |params| Box::pin(function(params)))),
        }
    }

    /// Declare a parameter that must be present and non-null.
    pub fn required<T: DeserializeOwned>(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamSpec::new::<T>(name, true));
        self
    }

    /// Declare a parameter that may be absent or null.
    pub fn optional<T: DeserializeOwned>(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamSpec::new::<T>(name, false));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Run the validation function.
    pub async fn call(&self, params: Params<C>) -> anyhow::Result<()> {
        match &self.function {
            ValidatorFunction::Sync(f) => f(&params),
            ValidatorFunction::Async(f) => f(params).await,
        }
    }
}

/// Access a nested optional field that a validator relies on.
pub fn required_field<'a, T>(value: &'a Option<T>, field: &str) -> anyhow::Result<&'a T> {
    value.as_ref().ok_or_else(|| anyhow!("'{}' does not exist", field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(entries: &[(&str, &str, Option<Value>)]) -> Params<()> {
        let values = entries
            .iter()
            .map(|(name, id, value)| {
                (
                    name.to_string(),
                    ParamValue {
                        id: id.to_string(),
                        value: value.clone(),
                    },
                )
            })
            .collect();
        Params::new(values, Arc::new(()))
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<String>(), "String");
        assert_eq!(short_type_name::<Vec<Option<String>>>(), "Vec<Option<String>>");
        assert_eq!(
            short_type_name::<chrono::DateTime<chrono::Utc>>(),
            "DateTime<Utc>"
        );
    }

    #[test]
    fn test_param_spec_accepts() {
        let validator = Validator::<()>::new("v", |_| Ok(()))
            .required::<bool>("flag")
            .optional::<String>("text");

        let flag = validator.param("flag").unwrap();
        assert!(flag.required);
        assert!(flag.accepts(&json!(true)));
        assert!(!flag.accepts(&json!("true")));

        let text = validator.param("text").unwrap();
        assert!(!text.required);
        assert_eq!(text.type_name, "String");
    }

    #[test]
    fn test_params_get() {
        let p = params(&[
            ("name", "customer.name", Some(json!("Max"))),
            ("missing", "customer.nickname", None),
            ("null", "customer.title", Some(Value::Null)),
        ]);

        assert_eq!(p.get::<String>("name").unwrap(), "Max");
        assert_eq!(p.get_opt::<String>("missing").unwrap(), None);
        assert_eq!(p.get_opt::<String>("null").unwrap(), None);

        let err = p.get::<String>("missing").unwrap_err();
        assert_eq!(err.to_string(), "customer.nickname not provided");

        let err = p.get::<u32>("name").unwrap_err();
        assert!(err.to_string().contains("customer.name is not an instance of u32"));

        assert!(p.get::<String>("unknown").is_err());
    }

    #[test]
    fn test_param_id_falls_back_to_name() {
        let p = params(&[("iban", "banks[contract_id=c1].iban", None)]);
        assert_eq!(p.param_id("iban"), "banks[contract_id=c1].iban");
        assert_eq!(p.param_id("bic"), "bic");
    }

    #[tokio::test]
    async fn test_call_sync_and_async() {
        let sync = Validator::<()>::new("sync", |p| {
            let value: i64 = p.get("value")?;
            if value < 0 {
                bail!("{} must not be negative", p.param_id("value"));
            }
            Ok(())
        })
        .required::<i64>("value");

        let err = sync
            .call(params(&[("value", "x.value", Some(json!(-1)))]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "x.value must not be negative");

        let asynchronous = Validator::<()>::new_async("async", |p: Params<()>| async move {
            let value: i64 = p.get("value")?;
            tokio::task::yield_now().await;
            if value == 0 {
                bail!("zero");
            }
            Ok(())
        })
        .required::<i64>("value");

        assert!(asynchronous
            .call(params(&[("value", "x.value", Some(json!(3)))]))
            .await
            .is_ok());
        assert!(asynchronous
            .call(params(&[("value", "x.value", Some(json!(0)))]))
            .await
            .is_err());
    }

    #[test]
    fn test_required_field() {
        let present = Some("50667".to_string());
        let absent: Option<String> = None;

        assert_eq!(required_field(&present, "postleitzahl").unwrap(), "50667");
        assert_eq!(
            required_field(&absent, "ort").unwrap_err().to_string(),
            "'ort' does not exist"
        );
    }
}
