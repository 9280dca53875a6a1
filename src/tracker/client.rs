use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::calendar::Quarter;

/// Client entry as served by the tracker clients feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub code: String,
    pub name: String,
    pub committed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollover: Option<f64>,
    /// Blank or unrecognised labels read as absent.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_quarter"
    )]
    pub current_quarter: Option<Quarter>,
}

fn lenient_quarter<'de, D>(deserializer: D) -> Result<Option<Quarter>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => return Ok(None),
        Some(serde_json::Value::String(label)) if label.trim().is_empty() => return Ok(None),
        Some(serde_json::Value::String(label)) => label,
        Some(other) => other.to_string(),
    };
    match label.parse::<Quarter>() {
        Ok(quarter) => Ok(Some(quarter)),
        Err(err) => {
            tracing::warn!(label = %label, error = %err, "ignoring unknown quarter label");
            Ok(None)
        }
    }
}

/// A client's committed monthly spend and quarter assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientBudget {
    pub code: String,
    pub name: String,
    pub committed_monthly: f64,
    pub rollover_credit: f64,
    pub quarter_label: Quarter,
}

impl ClientBudget {
    /// Resolves a feed record, defaulting the quarter to the calendar quarter
    /// containing `today`. Negative or non-finite amounts are clamped to zero.
    pub fn from_record(record: ClientRecord, today: NaiveDate) -> Self {
        let committed_monthly = non_negative(&record.code, "committed", record.committed);
        let rollover_credit =
            non_negative(&record.code, "rollover", record.rollover.unwrap_or(0.0));
        Self {
            quarter_label: record
                .current_quarter
                .unwrap_or_else(|| Quarter::containing(today)),
            code: record.code,
            name: record.name,
            committed_monthly,
            rollover_credit,
        }
    }
}

fn non_negative(code: &str, field: &str, value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!(client = code, field, value, "clamping invalid budget amount to zero");
        0.0
    }
}

/// Ordered client list keyed by code. Always replaced wholesale.
#[derive(Debug, Clone, Default)]
pub struct ClientDirectory {
    clients: Vec<ClientBudget>,
}

impl ClientDirectory {
    pub fn from_records(records: Vec<ClientRecord>, today: NaiveDate) -> Self {
        let mut directory = Self::default();
        directory.replace_all(records, today);
        directory
    }

    /// Swaps in a freshly fetched list. A repeated code keeps its last entry.
    pub fn replace_all(&mut self, records: Vec<ClientRecord>, today: NaiveDate) {
        let mut clients: Vec<ClientBudget> = Vec::with_capacity(records.len());
        for record in records {
            let client = ClientBudget::from_record(record, today);
            match clients.iter_mut().find(|existing| existing.code == client.code) {
                Some(existing) => *existing = client,
                None => clients.push(client),
            }
        }
        self.clients = clients;
    }

    pub fn get(&self, code: &str) -> Option<&ClientBudget> {
        self.clients.iter().find(|client| client.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClientBudget> {
        self.clients.iter()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
