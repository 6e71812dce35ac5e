//! Data set abstraction.

use serde::Serialize;

/// A unit of data that is validated as a whole.
///
/// Data sets are serialized into a JSON tree once per validation run. Paths and
/// queries of mapped validators are resolved against that tree, so the field
/// names seen by validators are the serialized names.
pub trait DataSet: Serialize + Send + Sync {
    /// Identifier used to attribute errors to this data set.
    fn id(&self) -> String;
}
