use serde::Serialize;

/// Sample conversation shown in the UI's sidebar. Nothing is recorded;
/// the list is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub id: u32,
    pub title: &'static str,
    pub timestamp: &'static str,
    pub preview: &'static str,
}

pub const HISTORY: [HistoryEntry; 2] = [
    HistoryEntry {
        id: 1,
        title: "Data extraction - E-commerce",
        timestamp: "2024-01-15T10:30:00",
        preview: "Extract products from an online store...",
    },
    HistoryEntry {
        id: 2,
        title: "Users API - FastAPI",
        timestamp: "2024-01-14T15:45:00",
        preview: "Build a REST API to manage users...",
    },
];

pub fn history() -> &'static [HistoryEntry] {
    &HISTORY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_fixed_and_ordered() {
        let entries = history();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 1);
        assert_eq!(entries[1].id, 2);
        assert_eq!(history(), entries);
    }

    #[test]
    fn timestamps_are_iso8601() {
        for entry in history() {
            assert!(
                chrono::NaiveDateTime::parse_from_str(entry.timestamp, "%Y-%m-%dT%H:%M:%S").is_ok(),
                "bad timestamp {}",
                entry.timestamp
            );
        }
    }
}
