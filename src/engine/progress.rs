use crate::catalog::ContentCatalog;
use crate::store::schema::UserProgress;

/// Score awarded the first time a lesson is completed.
pub const LESSON_REWARD: u32 = 10;

/// Mark `lesson_id` complete. Returns false (and changes nothing) if it
/// already was. Persisting is the caller's job.
pub fn mark_complete(progress: &mut UserProgress, lesson_id: &str) -> bool {
    if progress.is_completed(lesson_id) {
        return false;
    }
    progress.completed_lessons.push(lesson_id.to_string());
    progress.score = progress.score.saturating_add(LESSON_REWARD);
    true
}

/// A brand-new record with a fresh start date. Persisting is the caller's job.
pub fn reset(first_module: &str) -> UserProgress {
    UserProgress::new(first_module)
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModuleProgress {
    pub module_id: String,
    pub title: String,
    pub completed: usize,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    pub score: u32,
    pub start_date: String,
    pub modules: Vec<ModuleProgress>,
}

impl ProgressSummary {
    pub fn new(progress: &UserProgress, catalog: &ContentCatalog) -> Self {
        let modules = catalog
            .modules()
            .iter()
            .map(|m| ModuleProgress {
                module_id: m.id.clone(),
                title: m.title.clone(),
                completed: m
                    .lessons
                    .iter()
                    .filter(|l| progress.is_completed(&l.id))
                    .count(),
                total: m.lessons.len(),
            })
            .collect();

        Self {
            completed: progress.completed_count(),
            total: catalog.total_lessons(),
            score: progress.score,
            start_date: progress.start_date_label(),
            modules,
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }

    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mark_complete_rewards_once() {
        let mut progress = UserProgress::new("python_temelleri");

        assert!(mark_complete(&mut progress, "degiskenler"));
        assert_eq!(progress.score, 10);

        assert!(!mark_complete(&mut progress, "degiskenler"));
        assert_eq!(progress.score, 10);
        assert_eq!(progress.completed_lessons, vec!["degiskenler"]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut progress = UserProgress::new("ornek_projeler");
        progress.start_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        mark_complete(&mut progress, "degiskenler");
        mark_complete(&mut progress, "todo_app");

        let fresh = reset("python_temelleri");

        assert!(fresh.completed_lessons.is_empty());
        assert_eq!(fresh.score, 0);
        assert_eq!(fresh.current_module, "python_temelleri");
        let age = chrono::Local::now().naive_local() - fresh.start_date;
        assert!(age.num_seconds().abs() < 5);
    }

    #[test]
    fn test_two_of_fifteen_scenario() {
        let catalog = ContentCatalog::bundled().unwrap();
        let mut progress = UserProgress::new(catalog.first_module_id());
        mark_complete(&mut progress, "degiskenler");
        mark_complete(&mut progress, "operatorler");

        let summary = ProgressSummary::new(&progress, &catalog);

        assert_eq!(summary.score, 20);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.total, 15);
        assert_eq!(format!("{:.1}", summary.percent()), "13.3");
        assert_eq!(summary.modules[0].completed, 2);
        assert_eq!(summary.modules[1].completed, 0);
    }

    #[test]
    fn test_empty_summary_ratio_is_zero() {
        let catalog = ContentCatalog::bundled().unwrap();
        let summary = ProgressSummary::new(&UserProgress::new("python_temelleri"), &catalog);
        assert_eq!(summary.ratio(), 0.0);
    }

    fn lesson_ids() -> Vec<String> {
        ContentCatalog::bundled()
            .unwrap()
            .modules()
            .iter()
            .flat_map(|m| m.lessons.iter().map(|l| l.id.clone()))
            .collect()
    }

    proptest! {
        #[test]
        fn prop_score_tracks_distinct_completions(picks in prop::collection::vec(0usize..15, 0..60)) {
            let ids = lesson_ids();
            let mut progress = UserProgress::new("python_temelleri");
            for i in picks {
                mark_complete(&mut progress, &ids[i]);
            }

            let mut unique = progress.completed_lessons.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), progress.completed_lessons.len());
            prop_assert_eq!(progress.score as usize, LESSON_REWARD as usize * progress.completed_lessons.len());
            prop_assert!(progress.completed_lessons.iter().all(|id| ids.contains(id)));
        }
    }
}
