use serde::{de::DeserializeOwned, Serialize};

use crate::models::{EmergencyContacts, Medication, MedicationLogEntry, SymptomEntry, VitalReading};

/// The five independently stored record sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Vitals,
    Symptoms,
    Medications,
    MedicationLog,
    EmergencyContacts,
}

impl Collection {
    /// Storage key; matches the keys used by earlier versions of the tracker.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Vitals => "pots_vitals",
            Collection::Symptoms => "pots_symptoms",
            Collection::Medications => "pots_medications",
            Collection::MedicationLog => "pots_med_log",
            Collection::EmergencyContacts => "pots_emergency",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Collection::Vitals => "vitals",
            Collection::Symptoms => "symptoms",
            Collection::Medications => "medications",
            Collection::MedicationLog => "medication log",
            Collection::EmergencyContacts => "emergency contacts",
        }
    }
}

/// A record type that lives in exactly one collection.
pub trait CollectionRecord: Serialize + DeserializeOwned + Send + 'static {
    const COLLECTION: Collection;
}

impl CollectionRecord for VitalReading {
    const COLLECTION: Collection = Collection::Vitals;
}

impl CollectionRecord for SymptomEntry {
    const COLLECTION: Collection = Collection::Symptoms;
}

impl CollectionRecord for Medication {
    const COLLECTION: Collection = Collection::Medications;
}

impl CollectionRecord for MedicationLogEntry {
    const COLLECTION: Collection = Collection::MedicationLog;
}

impl CollectionRecord for EmergencyContacts {
    const COLLECTION: Collection = Collection::EmergencyContacts;
}
