//! Intake record capture and session persistence.

use crate::domain::error::WealthdeskError;
use crate::ports::store_port::StorePort;
use serde::{Deserialize, Serialize};

/// Session-store key the intake record lives under.
pub const SESSION_KEY: &str = "wealthData";

/// Raw intake figures exactly as entered. Every field is free text; numeric
/// interpretation happens later, at metrics time. Only `monthly_income` and
/// `monthly_savings` must be filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeRecord {
    pub monthly_income: String,
    pub monthly_savings: String,
    pub total_assets: String,
    pub total_liabilities: String,
    pub retirement_age: String,
    pub retirement_corpus: String,
    pub education_fund: String,
    pub home_purchase: String,
}

impl IntakeRecord {
    /// Checks the two required fields. Blank means missing; every optional
    /// field may stay empty.
    pub fn validate(&self) -> Result<(), WealthdeskError> {
        if self.monthly_income.trim().is_empty() {
            return Err(WealthdeskError::MissingField {
                field: "monthlyIncome".to_string(),
            });
        }
        if self.monthly_savings.trim().is_empty() {
            return Err(WealthdeskError::MissingField {
                field: "monthlySavings".to_string(),
            });
        }
        Ok(())
    }

    /// True when at least one goal target has been entered.
    pub fn has_goals(&self) -> bool {
        !self.retirement_corpus.trim().is_empty()
            || !self.education_fund.trim().is_empty()
            || !self.home_purchase.trim().is_empty()
    }
}

/// Validates the record and persists it under [`SESSION_KEY`], overwriting any
/// prior record. Nothing is written when validation fails.
pub fn submit(record: &IntakeRecord, store: &dyn StorePort) -> Result<(), WealthdeskError> {
    record.validate()?;
    let json = serde_json::to_string(record).map_err(|e| WealthdeskError::Storage {
        store: "session".to_string(),
        reason: format!("could not serialize intake record: {e}"),
    })?;
    store.set(SESSION_KEY, &json)
}

/// Reads the record back, `None` when nothing has been submitted this session.
pub fn load(store: &dyn StorePort) -> Result<Option<IntakeRecord>, WealthdeskError> {
    match store.get(SESSION_KEY)? {
        Some(json) => {
            let record =
                serde_json::from_str(&json).map_err(|e| WealthdeskError::SessionCorrupt {
                    reason: e.to_string(),
                })?;
            Ok(Some(record))
        }
        None => Ok(None),
    }
}

/// Discards the stored record. A no-op when nothing is stored.
pub fn clear(store: &dyn StorePort) -> Result<(), WealthdeskError> {
    store.clear(SESSION_KEY)
}
