//! Issuing company data printed in the page header and the legal footer.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    /// e.g. "S.A.R.L A.U".
    pub legal_form: String,
    pub activity: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub phones: Vec<String>,
    pub email: String,
    #[serde(default)]
    pub website: Option<String>,
    /// Registre de commerce.
    pub rc: String,
    /// Identifiant fiscal.
    pub if_number: String,
    /// Identifiant commun de l'entreprise.
    pub ice: String,
    /// Patente.
    pub pat: String,
}

impl CompanyProfile {
    pub fn from_json(json: &str) -> RenderResult<Self> {
        serde_json::from_str(json).map_err(|e| RenderError::config(format!("company profile: {e}")))
    }

    /// "RC : 120511  |  IF : 50628346  |  ICE : ...  |  PAT : ...".
    pub fn legal_identifiers_line(&self) -> String {
        [
            ("RC", &self.rc),
            ("IF", &self.if_number),
            ("ICE", &self.ice),
            ("PAT", &self.pat),
        ]
        .iter()
        .map(|(label, value)| format!("{label} : {value}"))
        .collect::<Vec<_>>()
        .join("  |  ")
    }

    pub fn phones_line(&self) -> Option<String> {
        if self.phones.is_empty() {
            None
        } else {
            Some(format!("Tél : {}", self.phones.join("  /  ")))
        }
    }

    pub fn address_line(&self) -> String {
        format!("{} - {}", self.address, self.city)
    }
}
