//! Validation manager.
//!
//! The manager owns the registered mapped validators and the shared context.
//! Validating a data set serializes it once and runs every mapped validator as
//! its own Tokio task. Errors of all validators are collected; a failing,
//! slow or panicking validator never stops the others.

use std::marker::PhantomData;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use serde_json::Value;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::dataset::DataSet;
use crate::error::{FrameworkError, FrameworkResult};
use crate::mapped::MappedValidator;
use crate::summary::{ErrorKind, Failure, ValidationError, ValidationSummary};

/// Tuning knobs for the validation manager.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Maximum run time of a single mapped validator per data set
    pub timeout: Option<Duration>,
    /// Maximum number of mapped validators running at the same time
    pub max_concurrency: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            max_concurrency: 64,
        }
    }
}

impl ManagerConfig {
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}

/// Runs registered mapped validators against data sets of type `D`.
///
/// `C` is the shared context handed to every validator call, e.g. a
/// migration configuration.
pub struct ValidationManager<D, C> {
    context: Arc<C>,
    config: ManagerConfig,
    validators: Vec<Arc<dyn MappedValidator<C>>>,
    _data_set: PhantomData<fn(&D)>,
}

impl<D, C> ValidationManager<D, C>
where
    D: DataSet,
    C: Send + Sync + 'static,
{
    pub fn new(context: C) -> Self {
        Self {
            context: Arc::new(context),
            config: ManagerConfig::default(),
            validators: Vec::new(),
            _data_set: PhantomData,
        }
    }

    pub fn with_config(mut self, config: ManagerConfig) -> FrameworkResult<Self> {
        if config.max_concurrency == 0 {
            return Err(FrameworkError::InvalidConfiguration(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        self.config = config;
        Ok(self)
    }

    /// Register a mapped validator.
    pub fn register<M>(&mut self, mapped: M) -> &mut Self
    where
        M: MappedValidator<C> + 'static,
    {
        debug!("Registering validator: {}", mapped.describe());
        self.validators.push(Arc::new(mapped));
        self
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Names of the registered validators in registration order.
    pub fn validator_names(&self) -> Vec<&str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Validate a single data set.
    pub async fn validate(&self, data_set: &D) -> FrameworkResult<ValidationSummary> {
        self.validate_many(std::iter::once(data_set)).await
    }

    /// Validate several data sets, one after another.
    pub async fn validate_many<'a, I>(&self, data_sets: I) -> FrameworkResult<ValidationSummary>
    where
        I: IntoIterator<Item = &'a D>,
        D: 'a,
    {
        let mut summary = ValidationSummary::new();

        for data_set in data_sets {
            let id = data_set.id();
            let errors = self.validate_data_set(&id, data_set).await?;
            if errors.is_empty() {
                debug!("Data set {} passed", id);
            } else {
                debug!("Data set {} has {} error(s)", id, errors.len());
            }
            summary.add_data_set(id, errors);
        }

        summary.finalize();
        info!(
            "Validation complete: {} passed, {} failed, {} errors",
            summary.num_succeeds(),
            summary.num_fails(),
            summary.num_errors_total()
        );

        Ok(summary)
    }

    async fn validate_data_set(&self, id: &str, data_set: &D) -> FrameworkResult<Vec<ValidationError>> {
        let data: Arc<Value> = Arc::new(serde_json::to_value(data_set).map_err(|source| {
            FrameworkError::Serialization {
                data_set: id.to_string(),
                source,
            }
        })?);

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let mut tasks = JoinSet::new();

        let names: Vec<String> = self.validators.iter().map(|v| v.name().to_string()).collect();

        for (index, validator) in self.validators.iter().enumerate() {
            let validator = Arc::clone(validator);
            let name = names[index].clone();
            let data = Arc::clone(&data);
            let context = Arc::clone(&self.context);
            let semaphore = Arc::clone(&semaphore);
            let timeout = self.config.timeout;

            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (index, vec![Failure::new(ErrorKind::Internal, "validation was cancelled")]);
                };

                let run = AssertUnwindSafe(validator.run(&data, context)).catch_unwind();
                let failures = match timeout {
                    Some(limit) => match tokio::time::timeout(limit, run).await {
                        Ok(outcome) => outcome,
                        Err(_) => {
                            warn!("Validator {} timed out", name);
                            return (
                                index,
                                vec![Failure::new(
                                    ErrorKind::Timeout,
                                    format!("validator timed out after {}ms", limit.as_millis()),
                                )],
                            );
                        }
                    },
                    None => run.await,
                };

                let failures = failures.unwrap_or_else(|panic| {
                    let message = panic
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| panic.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    warn!("Validator {} panicked: {}", name, message);
                    vec![Failure::new(ErrorKind::Internal, format!("validator panicked: {}", message))]
                });

                (index, failures)
            });
        }

        let outcomes = collect_outcomes(tasks, names.len()).await;

        Ok(names
            .into_iter()
            .zip(outcomes)
            .flat_map(|(name, failures)| {
                failures
                    .into_iter()
                    .map(move |failure| ValidationError::new(id, name.clone(), failure))
            })
            .collect())
    }
}

/// Wait for all validator tasks and return their failures in registration
/// order. A task that ends without reporting back (it panicked outside the
/// validator or was cancelled) counts as an `Internal` failure.
async fn collect_outcomes(mut tasks: JoinSet<(usize, Vec<Failure>)>, count: usize) -> Vec<Vec<Failure>> {
    let mut outcomes: Vec<Option<Vec<Failure>>> = vec![None; count];
    let mut lost = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, failures)) => outcomes[index] = Some(failures),
            Err(e) => {
                warn!("Validator task failed to complete: {}", e);
                lost.push(e.to_string());
            }
        }
    }

    let reason = if lost.is_empty() { "unknown error".to_string() } else { lost.join("; ") };
    outcomes
        .into_iter()
        .map(|outcome| {
            outcome.unwrap_or_else(|| {
                vec![Failure::new(
                    ErrorKind::Internal,
                    format!("validator task failed to complete: {}", reason),
                )]
            })
        })
        .collect()
}

impl<D, C> std::fmt::Debug for ValidationManager<D, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationManager")
            .field("config", &self.config)
            .field("validators", &self.validators.len())
            .finish()
    }
}
