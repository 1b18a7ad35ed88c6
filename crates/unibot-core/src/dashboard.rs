//! Vector-index statistics for the admin dashboard.

use std::cell::Ref;
use std::rc::Rc;

use unibot_types::{Result, api::VectorStats};
use crate::ports::DocumentPort;
use crate::view::{ViewRef, ViewState};

pub const FETCH_STATS_FAILED: &str = "Failed to fetch statistics";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsState {
    pub stats: Option<VectorStats>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Whether the server still has documents waiting to be indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    Idle,
    Active,
}

impl PipelineStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStatus::Idle => "Idle",
            PipelineStatus::Active => "Active",
        }
    }
}

/// Share of processed documents in `0.0..=1.0`; zero for an empty database.
pub fn processing_fraction(stats: &VectorStats) -> f32 {
    let db = &stats.database;
    if db.total_documents == 0 {
        return 0.0;
    }
    (db.processed_documents as f64 / db.total_documents as f64).clamp(0.0, 1.0) as f32
}

/// Rounded percentage of processed documents.
pub fn processing_percent(stats: &VectorStats) -> u32 {
    let db = &stats.database;
    if db.total_documents == 0 {
        return 0;
    }
    (db.processed_documents as f64 * 100.0 / db.total_documents as f64).round() as u32
}

pub fn pipeline_status(stats: &VectorStats) -> PipelineStatus {
    if stats.database.unprocessed_documents == 0 {
        PipelineStatus::Idle
    } else {
        PipelineStatus::Active
    }
}

pub struct StatsController {
    state: ViewState<StatsState>,
    documents: Rc<dyn DocumentPort>,
}

impl StatsController {
    pub fn new(documents: Rc<dyn DocumentPort>) -> Self {
        Self {
            state: ViewState::new(StatsState {
                loading: true,
                ..StatsState::default()
            }),
            documents,
        }
    }

    pub fn state(&self) -> Ref<'_, StatsState> {
        self.state.borrow()
    }

    pub fn handle(&self) -> StatsHandle {
        StatsHandle {
            state: self.state.downgrade(),
            documents: self.documents.clone(),
        }
    }
}

#[derive(Clone)]
pub struct StatsHandle {
    state: ViewRef<StatsState>,
    documents: Rc<dyn DocumentPort>,
}

impl StatsHandle {
    pub async fn refresh(&self) -> Result<()> {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        })?;

        let result = self.documents.vector_stats().await;
        self.state.update(|s| {
            s.loading = false;
            match result {
                Ok(stats) => {
                    s.stats = Some(stats);
                    Ok(())
                }
                Err(e) => {
                    log::error!("Error fetching stats: {}", e);
                    s.error = Some(FETCH_STATS_FAILED.to_string());
                    Err(e)
                }
            }
        })?
    }
}
