//! # pv_tool
//!
//! Plausibility validation rules for the migration data sets.
//!
//! - **customer_loader**: rule set for `TripicaCustomerLoaderDataSet`
//! - **resource_loader**: rule set for `TripicaResourceLoaderDataSet`
//! - **checks**: the individual rules, reusable across managers
//! - **banking**, **email**, **malo_id**: identifier syntax checks
//! - **config**: the migration configuration (key date)
//!
//! ## Example
//!
//! ```rust,ignore
//! use pv_tool::{customer_validation_manager, MigrationConfig};
//!
//! let config = MigrationConfig::load(Path::new("migration.toml"))?;
//! let manager = customer_validation_manager(config)?;
//! let summary = manager.validate(&data_set).await?;
//! println!("{}", summary.report());
//! ```

pub mod banking;
pub mod checks;
pub mod config;
pub mod customer_loader;
pub mod email;
pub mod error;
pub mod malo_id;
pub mod resource_loader;

pub use banking::{validate_bic, validate_iban, BankingError};
pub use config::{MigrationConfig, KEY_DATE_ENV};
pub use customer_loader::{customer_validation_manager, CustomerValidationManager};
pub use email::{validate_email, EmailError};
pub use error::{ToolError, ToolResult};
pub use malo_id::{validate_marktlokations_id, MaloId, MaloIdError};
pub use resource_loader::{resource_validation_manager, ResourceValidationManager};
