use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// On-disk format of `start_date`.
pub const START_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The single persisted progress record.
///
/// Schema contract for `user_progress.json`:
///
/// ```json
/// {
///   "start_date": "2026-10-16 09:30:00",
///   "completed_lessons": ["degiskenler"],
///   "current_module": "python_temelleri",
///   "score": 10
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    #[serde(with = "start_date_format")]
    pub start_date: NaiveDateTime,
    #[serde(default)]
    pub completed_lessons: Vec<String>,
    #[serde(default)]
    pub current_module: String,
    #[serde(default)]
    pub score: u32,
}

impl UserProgress {
    pub fn new(first_module: &str) -> Self {
        Self {
            start_date: now_to_second(),
            completed_lessons: Vec::new(),
            current_module: first_module.to_string(),
            score: 0,
        }
    }

    pub fn is_completed(&self, lesson_id: &str) -> bool {
        self.completed_lessons.iter().any(|id| id == lesson_id)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_lessons.len()
    }

    pub fn start_date_label(&self) -> String {
        self.start_date.format(START_DATE_FORMAT).to_string()
    }

    /// Drop duplicate and unknown lesson ids from a freshly loaded record.
    /// Returns the ids that were removed. The score is left alone.
    pub fn sanitize(&mut self, is_known: impl Fn(&str) -> bool) -> Vec<String> {
        let mut kept: Vec<String> = Vec::with_capacity(self.completed_lessons.len());
        let mut dropped = Vec::new();
        for id in self.completed_lessons.drain(..) {
            if !is_known(id.as_str()) || kept.contains(&id) {
                dropped.push(id);
            } else {
                kept.push(id);
            }
        }
        self.completed_lessons = kept;
        dropped
    }
}

/// Local time truncated to whole seconds, so a save/load round trip through
/// [`START_DATE_FORMAT`] is lossless.
pub fn now_to_second() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

mod start_date_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::START_DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(START_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, START_DATE_FORMAT).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_date_serializes_in_fixed_format() {
        let mut progress = UserProgress::new("python_temelleri");
        progress.start_date =
            NaiveDateTime::parse_from_str("2024-03-01 08:05:09", START_DATE_FORMAT).unwrap();
        let json = serde_json::to_string(&progress).unwrap();
        assert!(json.contains("\"start_date\":\"2024-03-01 08:05:09\""));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let progress: UserProgress =
            serde_json::from_str(r#"{"start_date":"2024-03-01 08:05:09"}"#).unwrap();
        assert!(progress.completed_lessons.is_empty());
        assert_eq!(progress.score, 0);
        assert_eq!(progress.current_module, "");
    }

    #[test]
    fn test_bad_start_date_is_rejected() {
        let parsed = serde_json::from_str::<UserProgress>(r#"{"start_date":"yesterday"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_sanitize_drops_unknown_and_duplicate_ids() {
        let mut progress = UserProgress::new("python_temelleri");
        progress.completed_lessons = vec![
            "degiskenler".to_string(),
            "silinmis_ders".to_string(),
            "degiskenler".to_string(),
            "operatorler".to_string(),
        ];
        progress.score = 40;

        let dropped = progress.sanitize(|id| id != "silinmis_ders");

        assert_eq!(progress.completed_lessons, vec!["degiskenler", "operatorler"]);
        assert_eq!(dropped, vec!["silinmis_ders", "degiskenler"]);
        assert_eq!(progress.score, 40);
    }

    #[test]
    fn test_new_record_has_whole_seconds() {
        let progress = UserProgress::new("python_temelleri");
        assert_eq!(progress.start_date.nanosecond(), 0);
    }
}
