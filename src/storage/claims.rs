//! Claim repository for JSON storage
//!
//! Manages loading and saving claims to claims.json. Claims keep the order
//! they were stored in, which is the stream order views break date ties by.
//!
//! Records that cannot be ingested are kept out of every view but written
//! back unchanged, as are loaded claims nobody has modified.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::{ClaimsError, ClaimsResult};
use crate::models::{Claim, ClaimDocument, ClaimId};

use super::file_io::{read_json, write_json_atomic};
use super::records::{records, Slot};

/// Keys of the stored claim shape, aliases included
const CLAIM_FIELDS: &[&str] = &[
    "id",
    "uid",
    "userName",
    "employeeName",
    "email",
    "employeeEmail",
    "date",
    "description",
    "amount",
    "status",
    "createdAt",
    "timestamp",
    "updatedAt",
    "approvedBy",
    "rejectedBy",
    "rejectionReason",
];

/// Amounts are fixed at submission; the stored value always wins
const KEPT_FIELDS: &[&str] = &["amount"];

/// Serializable claim data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ClaimData {
    #[serde(default)]
    claims: Vec<Value>,
}

/// Repository for claim persistence
pub struct ClaimRepository {
    path: PathBuf,
    data: RwLock<Vec<Slot<Claim>>>,
}

/// Turn one stored element into a slot
///
/// A document without an id gets one derived from its content, counting
/// identical documents seen earlier in the file so each keeps a distinct id.
fn ingest(raw: Value, seen: &mut HashMap<String, usize>) -> Slot<Claim> {
    let mut doc: ClaimDocument = match serde_json::from_value(raw.clone()) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(error = %e, "Keeping unreadable claim record as stored");
            return Slot::Unreadable(raw);
        }
    };

    if doc.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
        let content = raw.to_string();
        let occurrence = seen.entry(content.clone()).or_insert(0);
        doc.id = Some(ClaimId::derived(&format!("{}#{}", content, occurrence)).to_string());
        *occurrence += 1;
    }

    let id = doc.id.clone();
    match Claim::from_document(doc) {
        Ok(claim) => Slot::loaded(claim, raw),
        Err(e) => {
            tracing::warn!(
                claim_id = id.as_deref().unwrap_or("<unassigned>"),
                error = %e,
                "Skipping claim record"
            );
            Slot::Unreadable(raw)
        }
    }
}

fn render(claim: &Claim) -> ClaimsResult<Value> {
    Ok(serde_json::to_value(claim.to_document())?)
}

impl ClaimRepository {
    /// Create a new claim repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load claims from disk
    ///
    /// Documents with an unrecognized status are skipped with a warning;
    /// the rest of the file still loads.
    pub fn load(&self) -> ClaimsResult<()> {
        let file_data: ClaimData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut seen = HashMap::new();
        *data = file_data
            .claims
            .into_iter()
            .map(|raw| ingest(raw, &mut seen))
            .collect();

        tracing::debug!(
            count = records(&data).count(),
            stored = data.len(),
            path = %self.path.display(),
            "Loaded claims"
        );
        Ok(())
    }

    /// Save claims to disk
    pub fn save(&self) -> ClaimsResult<()> {
        let data = self.data.read().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let claims = data
            .iter()
            .map(|slot| slot.to_value(CLAIM_FIELDS, KEPT_FIELDS, render))
            .collect::<ClaimsResult<Vec<_>>>()?;
        write_json_atomic(&self.path, &ClaimData { claims })
    }

    /// Get a claim by ID
    pub fn get(&self, id: &ClaimId) -> ClaimsResult<Option<Claim>> {
        let data = self.data.read().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let found = records(&data).find(|c| &c.id == id).cloned();
        Ok(found)
    }

    /// Get all claims in stored order
    pub fn get_all(&self) -> ClaimsResult<Vec<Claim>> {
        let data = self.data.read().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(records(&data).cloned().collect())
    }

    /// Append a new claim
    pub fn insert(&self, claim: Claim) -> ClaimsResult<()> {
        let mut data = self.data.write().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if records(&data).any(|c| c.id == claim.id) {
            return Err(ClaimsError::Duplicate {
                entity_type: "Claim",
                identifier: claim.id.to_string(),
            });
        }

        data.push(Slot::added(claim));
        Ok(())
    }

    /// Replace an existing claim in place, keeping its position
    pub fn replace(&self, claim: Claim) -> ClaimsResult<()> {
        let mut data = self.data.write().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let slot = data
            .iter_mut()
            .find(|slot| slot.record().is_some_and(|c| c.id == claim.id))
            .ok_or_else(|| ClaimsError::claim_not_found(claim.id.to_string()))?;
        slot.replace(claim);
        Ok(())
    }

    /// Delete a claim
    pub fn delete(&self, id: &ClaimId) -> ClaimsResult<bool> {
        let mut data = self.data.write().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let before = data.len();
        data.retain(|slot| slot.record().map_or(true, |c| &c.id != id));
        Ok(data.len() != before)
    }

    /// Count claims
    pub fn count(&self) -> ClaimsResult<usize> {
        let data = self.data.read().map_err(|e| {
            ClaimsError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(records(&data).count())
    }
}
