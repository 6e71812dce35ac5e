//! # pv_model
//!
//! The BO4E based migration data model.
//!
//! - **enums**: BO4E enumerations (`Anrede`, `Landescode`, `Sparte`, ...)
//! - **com**: BO4E components (`Adresse`, `ExterneReferenz`, `Bankverbindung`, ...)
//! - **bo**: BO4E business objects (`GeschaeftspartnerErweitert`, `Marktlokation`, ...)
//! - **datasets**: Loader data sets that are validated as a whole
//! - **load**: Parsing data sets from JSON exports
//!
//! Almost every field is optional. Exports from source systems are frequently
//! incomplete, and an incomplete data set has to be loadable so that the
//! validators can report what is missing.

pub mod bo;
pub mod com;
pub mod datasets;
pub mod enums;
pub mod error;
pub mod load;

pub use bo::{GeschaeftspartnerErweitert, Marktlokation, Messlokation, Vertrag, Zaehler};
pub use com::{
    Adresse, Bankverbindung, ExterneReferenz, Messlokationszuordnung, SepaInfo, VertragskontoCba,
    VertragskontoMba,
};
pub use datasets::{TripicaCustomerLoaderDataSet, TripicaResourceLoaderDataSet};
pub use enums::{Anrede, Kontaktart, Landescode, Sparte};
pub use error::{ModelError, ModelResult};
pub use load::parse_data_sets;
