use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use resume_ranker::screening::{RankedResult, ResumeRanker};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared dependencies for the ranking endpoints.
#[derive(Clone)]
pub(crate) struct RankingState {
    pub(crate) ranker: Arc<ResumeRanker>,
    pub(crate) history: Arc<RankingHistory>,
    pub(crate) max_documents: usize,
}

/// One past ranking as shown on the history page.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct HistoryEntry {
    pub(crate) ranking_id: u64,
    pub(crate) ranked_at: DateTime<Utc>,
    pub(crate) lines: Vec<String>,
}

/// Bounded log of rankings served by this process; the oldest entry is
/// dropped once `limit` is reached.
#[derive(Debug)]
pub(crate) struct RankingHistory {
    limit: usize,
    log: Mutex<HistoryLog>,
}

#[derive(Debug, Default)]
struct HistoryLog {
    last_id: u64,
    entries: VecDeque<HistoryEntry>,
}

impl RankingHistory {
    pub(crate) fn with_limit(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            log: Mutex::new(HistoryLog::default()),
        }
    }

    /// Record a ranking and return its id. Ids start at 1 and are never reused.
    pub(crate) fn record(&self, ranked: &[RankedResult]) -> u64 {
        let mut guard = self.log.lock().expect("history mutex poisoned");
        guard.last_id += 1;
        let ranking_id = guard.last_id;
        while guard.entries.len() >= self.limit {
            guard.entries.pop_front();
        }
        guard.entries.push_back(HistoryEntry {
            ranking_id,
            ranked_at: Utc::now(),
            lines: summary_lines(ranked),
        });
        ranking_id
    }

    pub(crate) fn entries(&self) -> Vec<HistoryEntry> {
        let guard = self.log.lock().expect("history mutex poisoned");
        guard.entries.iter().cloned().collect()
    }
}

/// `Rank 1: Score 0.42` style lines.
pub(crate) fn summary_lines(ranked: &[RankedResult]) -> Vec<String> {
    ranked
        .iter()
        .enumerate()
        .map(|(index, result)| format!("Rank {}: Score {:.2}", index + 1, result.score))
        .collect()
}
