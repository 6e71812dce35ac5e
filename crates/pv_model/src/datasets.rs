//! Loader data sets.
//!
//! Every data set bundles the business objects one target-system loader needs
//! for a single customer or resource.

use std::collections::BTreeMap;

use pv_framework::DataSet;
use serde::{Deserialize, Serialize};

use crate::bo::{GeschaeftspartnerErweitert, Marktlokation, Messlokation, Vertrag, Zaehler};
use crate::com::{Adresse, Bankverbindung, VertragskontoMba};

/// Customer data for the Tripica customer loader.
///
/// Addresses and bank accounts are keyed by contract id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TripicaCustomerLoaderDataSet {
    pub powercloud_customer_id: String,
    #[serde(default)]
    pub geschaeftspartner_erw: GeschaeftspartnerErweitert,
    #[serde(default)]
    pub liefer_adressen: Option<BTreeMap<String, Adresse>>,
    #[serde(default)]
    pub rechnungs_adressen: Option<BTreeMap<String, Adresse>>,
    #[serde(default)]
    pub banks: Option<BTreeMap<String, Bankverbindung>>,
    #[serde(default)]
    pub vertragskonten_mbas: Option<Vec<VertragskontoMba>>,
}

impl DataSet for TripicaCustomerLoaderDataSet {
    fn id(&self) -> String {
        if self.powercloud_customer_id.is_empty() {
            "<unknown customer>".to_string()
        } else {
            self.powercloud_customer_id.clone()
        }
    }
}

/// Resource data (market location, metering location, contract, meter) for
/// the Tripica resource loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TripicaResourceLoaderDataSet {
    #[serde(default)]
    pub marktlokation: Marktlokation,
    #[serde(default)]
    pub messlokation: Messlokation,
    #[serde(default)]
    pub vertrag: Vertrag,
    #[serde(default)]
    pub zaehler: Zaehler,
}

impl DataSet for TripicaResourceLoaderDataSet {
    fn id(&self) -> String {
        self.marktlokation
            .marktlokations_id
            .as_deref()
            .or(self.messlokation.messlokations_id.as_deref())
            .or(self.zaehler.zaehlernummer.as_deref())
            .unwrap_or("<unknown resource>")
            .to_string()
    }
}
