use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tripcal_core::Planner;
use tripcal_core::config::TripcalConfig;
use tripcal_core::session::PlannerSession;

/// Shared application state
///
/// One planning session per server: tripcal is a single-user tool.
#[derive(Clone)]
pub struct AppState {
    planner: Arc<Planner>,
    session: Arc<Mutex<PlannerSession>>,
}

impl AppState {
    pub fn new(config: &TripcalConfig) -> Result<Self> {
        let planner = Planner::from_config(config)?;
        Ok(Self::with_planner(planner))
    }

    pub fn with_planner(planner: Planner) -> Self {
        AppState {
            planner: Arc::new(planner),
            session: Arc::new(Mutex::new(PlannerSession::new())),
        }
    }

    pub fn planner(&self) -> &Arc<Planner> {
        &self.planner
    }

    pub fn session(&self) -> &Arc<Mutex<PlannerSession>> {
        &self.session
    }
}
