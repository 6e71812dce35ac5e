//! # pv_framework
//!
//! A rule-validation framework for migration data sets.
//!
//! This crate provides:
//! - **Validators**: Named validation functions with declared, typed parameters
//! - **Mapped Validators**: Bind validator parameters to paths or queries into a data set
//! - **Validation Manager**: Run all registered validators concurrently and aggregate errors
//! - **Summaries**: Per-run reports with error counts and stable error ids
//!
//! ## Example
//!
//! ```rust,ignore
//! use pv_framework::{PathMappedValidator, Params, ValidationManager, Validator};
//!
//! fn check_not_empty(params: &Params<()>) -> anyhow::Result<()> {
//!     let name: String = params.get("name")?;
//!     if name.is_empty() {
//!         anyhow::bail!("{} must not be empty", params.param_id("name"));
//!     }
//!     Ok(())
//! }
//!
//! let validator = Validator::new("check_not_empty", check_not_empty).required::<String>("name");
//!
//! let mut manager = ValidationManager::<Customer, ()>::new(());
//! manager.register(PathMappedValidator::new(validator, [("name", "customer.name")])?);
//!
//! let summary = manager.validate(&customer).await?;
//! if summary.num_fails() > 0 {
//!     println!("{}", summary.report());
//! }
//! ```

pub mod dataset;
pub mod error;
pub mod manager;
pub mod mapped;
pub mod query;
pub mod summary;
pub mod validator;

pub use dataset::DataSet;
pub use error::{FrameworkError, FrameworkResult};
pub use manager::{ManagerConfig, ValidationManager};
pub use mapped::{MappedValidator, ParallelQueryMappedValidator, PathMappedValidator, QueryMappedValidator};
pub use query::{IterFn, IterStrategy, Lookup, Query, QueryItem};
pub use summary::{ErrorKind, Failure, ValidationError, ValidationSummary};
pub use validator::{required_field, ParamSpec, ParamValue, Params, Validator, ValidatorFunction};
