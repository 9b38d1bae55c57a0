//! Custom work project list
//!
//! Student-created project entries, persisted to LocalStorage under a
//! fixed key. Loaded once at startup, saved on every mutation; corrupt
//! or missing data degrades to an empty list without surfacing an
//! error.

use serde::{Deserialize, Serialize};

/// Fixed project categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkKind {
    #[default]
    AdvancedAlgebra,
    CalculusApplications,
    GeometryProblems,
    StatisticsAnalysis,
}

impl WorkKind {
    pub fn label(&self) -> &'static str {
        match self {
            WorkKind::AdvancedAlgebra => "Advanced Algebra Project",
            WorkKind::CalculusApplications => "Calculus Applications Project",
            WorkKind::GeometryProblems => "Geometry Problem Solving Project",
            WorkKind::StatisticsAnalysis => "Statistics Analysis Project",
        }
    }

    pub fn all() -> [WorkKind; 4] {
        [
            WorkKind::AdvancedAlgebra,
            WorkKind::CalculusApplications,
            WorkKind::GeometryProblems,
            WorkKind::StatisticsAnalysis,
        ]
    }
}

/// A single custom-work entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkEntry {
    pub id: u64,
    pub title: String,
    pub kind: WorkKind,
    pub description: String,
    /// ISO-8601 creation timestamp, supplied by the platform layer
    pub created_at: String,
}

/// The custom-work list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomWork {
    pub entries: Vec<WorkEntry>,
}

impl CustomWork {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "digilab_customwork";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&WorkEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Add an entry and return its id, or `None` when the title or
    /// description is blank. `timestamp_ms` seeds the id; collisions
    /// (two entries created in the same millisecond) bump upward.
    pub fn add(
        &mut self,
        title: &str,
        kind: WorkKind,
        description: &str,
        timestamp_ms: f64,
        created_at: String,
    ) -> Option<u64> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() || description.is_empty() {
            return None;
        }

        let mut id = timestamp_ms.max(0.0) as u64;
        while self.get(id).is_some() {
            id += 1;
        }

        self.entries.push(WorkEntry {
            id,
            title: title.to_string(),
            kind,
            description: description.to_string(),
            created_at,
        });
        Some(id)
    }

    /// Remove an entry by id; returns whether anything was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Load the list from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<CustomWork>(&json) {
                    Ok(list) => {
                        log::info!("Loaded {} custom work entries", list.len());
                        return list;
                    }
                    Err(e) => {
                        log::warn!("Discarding corrupt custom work list: {}", e);
                    }
                }
            }
        }

        Self::new()
    }

    /// Save the list to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Custom work saved ({} entries)", self.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_args() -> (&'static str, WorkKind, &'static str) {
        (
            "Quadratic patterns",
            WorkKind::AdvancedAlgebra,
            "Investigate discriminants of exam problems",
        )
    }

    #[test]
    fn test_add_and_get() {
        let mut list = CustomWork::new();
        let (title, kind, desc) = entry_args();
        let id = list
            .add(title, kind, desc, 1_700_000_000_000.0, "2023-11-14T22:13:20Z".into())
            .unwrap();
        assert_eq!(list.len(), 1);
        let entry = list.get(id).unwrap();
        assert_eq!(entry.title, title);
        assert_eq!(entry.kind, WorkKind::AdvancedAlgebra);
    }

    #[test]
    fn test_blank_fields_rejected() {
        let mut list = CustomWork::new();
        assert!(list.add("  ", WorkKind::GeometryProblems, "desc", 1.0, String::new()).is_none());
        assert!(list.add("title", WorkKind::GeometryProblems, "\t", 1.0, String::new()).is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_same_millisecond_ids_bump() {
        let mut list = CustomWork::new();
        let (title, kind, desc) = entry_args();
        let a = list.add(title, kind, desc, 42.0, String::new()).unwrap();
        let b = list.add(title, kind, desc, 42.0, String::new()).unwrap();
        assert_ne!(a, b);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut list = CustomWork::new();
        let (title, kind, desc) = entry_args();
        let id = list.add(title, kind, desc, 7.0, String::new()).unwrap();
        assert!(list.remove(id));
        assert!(!list.remove(id));
        assert!(list.is_empty());
    }

    #[test]
    fn test_corrupt_json_degrades_to_empty() {
        // The wasm path logs and falls back; the serde half of that
        // behavior is testable everywhere.
        assert!(serde_json::from_str::<CustomWork>("{not json").is_err());
        let round: CustomWork =
            serde_json::from_str(&serde_json::to_string(&CustomWork::new()).unwrap()).unwrap();
        assert!(round.is_empty());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&WorkKind::CalculusApplications).unwrap();
        assert_eq!(json, "\"calculus_applications\"");
    }
}
