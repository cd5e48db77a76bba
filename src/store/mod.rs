//! Typed read/write over the record collections.
//!
//! Every collection is stored as one JSON array under its key. There is no
//! partial update: callers read the whole sequence, change it, and write it
//! back. A key that was never written reads as an empty collection; a key
//! whose text no longer parses is reported as corrupt instead of being
//! silently treated as empty.

mod collection;

pub use collection::{Collection, CollectionRecord};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    db::Database,
    error::TrackerError,
    models::{EmergencyContacts, Medication, MedicationLogEntry, SymptomEntry, VitalReading},
};

/// Every collection at once, in the field layout of a backup file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Collections {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub vitals: Vec<VitalReading>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub symptoms: Vec<SymptomEntry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub medications: Vec<Medication>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub med_log: Vec<MedicationLogEntry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub emergency: Vec<EmergencyContacts>,
}

/// Older backups may carry `null` for a collection; treat it like a missing field.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone)]
pub struct RecordStore {
    db: Database,
}

impl RecordStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn read<R: CollectionRecord>(&self) -> Result<Vec<R>> {
        let collection = R::COLLECTION;
        let raw = self.db.get_record(collection.key()).await?;

        match raw {
            None => Ok(Vec::new()),
            Some(text) => serde_json::from_str::<Vec<R>>(&text).map_err(|err| {
                warn!(
                    "Stored {} collection under {} does not parse: {err}",
                    collection.label(),
                    collection.key()
                );
                TrackerError::CorruptCollection {
                    collection: collection.label(),
                    reason: err.to_string(),
                }
                .into()
            }),
        }
    }

    pub async fn write<R: CollectionRecord>(&self, records: &[R]) -> Result<()> {
        let collection = R::COLLECTION;
        let text = serde_json::to_string(records)
            .with_context(|| format!("failed to serialize {}", collection.label()))?;
        self.db.put_record(collection.key(), text).await?;
        debug!("Wrote {} {} record(s)", records.len(), collection.label());
        Ok(())
    }

    /// Appends in order and returns the new collection length.
    pub async fn append<R: CollectionRecord>(&self, new_records: Vec<R>) -> Result<usize> {
        let mut records = self.read::<R>().await?;
        records.extend(new_records);
        self.write(&records).await?;
        Ok(records.len())
    }

    /// Keeps the records matching `keep` and returns how many were dropped.
    pub async fn retain<R, F>(&self, keep: F) -> Result<usize>
    where
        R: CollectionRecord,
        F: FnMut(&R) -> bool,
    {
        let mut records = self.read::<R>().await?;
        let before = records.len();
        records.retain(keep);
        let removed = before - records.len();
        if removed > 0 {
            self.write(&records).await?;
        }
        Ok(removed)
    }

    pub async fn snapshot(&self) -> Result<Collections> {
        Ok(Collections {
            vitals: self.read().await?,
            symptoms: self.read().await?,
            medications: self.read().await?,
            med_log: self.read().await?,
            emergency: self.read().await?,
        })
    }

    /// Replaces all five collections in a single transaction.
    pub async fn replace_all(&self, collections: &Collections) -> Result<()> {
        let entries = vec![
            encode(Collection::Vitals, &collections.vitals)?,
            encode(Collection::Symptoms, &collections.symptoms)?,
            encode(Collection::Medications, &collections.medications)?,
            encode(Collection::MedicationLog, &collections.med_log)?,
            encode(Collection::EmergencyContacts, &collections.emergency)?,
        ];
        self.db.put_records(entries).await?;
        info!(
            "Replaced all collections: {} vitals, {} symptom logs, {} medications, {} doses",
            collections.vitals.len(),
            collections.symptoms.len(),
            collections.medications.len(),
            collections.med_log.len()
        );
        Ok(())
    }

    pub async fn clear_all(&self) -> Result<()> {
        let removed = self.db.delete_all_records().await?;
        info!("Cleared {removed} stored collection(s)");
        Ok(())
    }
}

fn encode<R: Serialize>(collection: Collection, records: &[R]) -> Result<(String, String)> {
    let text = serde_json::to_string(records)
        .with_context(|| format!("failed to serialize {}", collection.label()))?;
    Ok((collection.key().to_string(), text))
}
