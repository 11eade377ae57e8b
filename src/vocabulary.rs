//! Vocabulary registry: maps QR marker ids to Romanian target words and
//! experimental conditions.
//!
//! The registry is configuration, not data: it is built once at startup from
//! a hard-coded catalog and injected into the application state. There is no
//! mutation API and nothing is persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display modality for a vocabulary item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modality {
    #[serde(rename = "AR_TEXT_AUDIO")]
    ArTextAudio,
    #[serde(rename = "TRADITIONAL_TEXT_AUDIO")]
    TraditionalTextAudio,
}

impl Modality {
    /// Storage/wire string for this modality
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::ArTextAudio => "AR_TEXT_AUDIO",
            Modality::TraditionalTextAudio => "TRADITIONAL_TEXT_AUDIO",
        }
    }
}

/// Experiment stage a marker belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Practice,
    Experiment,
    Unknown,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Practice => "practice",
            Phase::Experiment => "experiment",
            Phase::Unknown => "unknown",
        }
    }
}

/// One vocabulary item: what to display and under which condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabEntry {
    /// Romanian word to display/play
    pub target_word: &'static str,
    /// English object name
    pub object_name: &'static str,
    pub modality: Modality,
    pub phase: Phase,
}

/// Immutable marker-id → vocabulary-entry table
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: BTreeMap<&'static str, VocabEntry>,
}

/// The experiment catalog: 3 practice items plus 6 experimental items
/// (counterbalanced across AR and traditional presentation).
const CATALOG: &[(&str, VocabEntry)] = &[
    // Practice phase
    (
        "PRACTICE_PLATE",
        VocabEntry {
            target_word: "farfurie",
            object_name: "plate",
            modality: Modality::ArTextAudio,
            phase: Phase::Practice,
        },
    ),
    (
        "PRACTICE_PEAR",
        VocabEntry {
            target_word: "pară",
            object_name: "pear",
            modality: Modality::TraditionalTextAudio,
            phase: Phase::Practice,
        },
    ),
    (
        "PRACTICE_GLOVES",
        VocabEntry {
            target_word: "mânuși",
            object_name: "gloves",
            modality: Modality::ArTextAudio,
            phase: Phase::Practice,
        },
    ),
    // Experimental phase
    (
        "CUP_ID_1",
        VocabEntry {
            target_word: "cupă",
            object_name: "cup",
            modality: Modality::ArTextAudio,
            phase: Phase::Experiment,
        },
    ),
    (
        "APPLE_ID_2",
        VocabEntry {
            target_word: "măr",
            object_name: "apple",
            modality: Modality::TraditionalTextAudio,
            phase: Phase::Experiment,
        },
    ),
    (
        "SHOES_ID_3",
        VocabEntry {
            target_word: "pantofi",
            object_name: "shoes",
            modality: Modality::TraditionalTextAudio,
            phase: Phase::Experiment,
        },
    ),
    (
        "SPOON_ID_4",
        VocabEntry {
            target_word: "lingură",
            object_name: "spoon",
            modality: Modality::ArTextAudio,
            phase: Phase::Experiment,
        },
    ),
    (
        "CUCUMBER_ID_5",
        VocabEntry {
            target_word: "castravete",
            object_name: "cucumber",
            modality: Modality::ArTextAudio,
            phase: Phase::Experiment,
        },
    ),
    (
        "JACKET_ID_6",
        VocabEntry {
            target_word: "jachetă",
            object_name: "jacket",
            modality: Modality::ArTextAudio,
            phase: Phase::Experiment,
        },
    ),
];

impl Vocabulary {
    /// Build the registry from the hard-coded experiment catalog
    pub fn builtin() -> Self {
        Self {
            entries: CATALOG.iter().copied().collect(),
        }
    }

    /// Look up the vocabulary entry for a marker id
    pub fn lookup(&self, marker_id: &str) -> Option<&VocabEntry> {
        self.entries.get(marker_id)
    }

    pub fn contains(&self, marker_id: &str) -> bool {
        self.entries.contains_key(marker_id)
    }

    /// All valid marker ids (deterministic order, used in NotFound diagnostics)
    pub fn marker_ids(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    /// Marker ids belonging to the given phase
    pub fn markers_by_phase(&self, phase: Phase) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|(_, e)| e.phase == phase)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Marker ids presented under the given modality
    pub fn markers_by_modality(&self, modality: Modality) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|(_, e)| e.modality == modality)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
