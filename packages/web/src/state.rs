use std::sync::Arc;

use tahvel_api::db::AccountStore;
use tahvel_api::tahvel::{Fetcher, TahvelApi};
use tahvel_api::Settings;

/// Shared handles passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub accounts: Arc<dyn AccountStore>,
    pub tahvel: Arc<dyn TahvelApi>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        accounts: impl AccountStore + 'static,
        tahvel: impl TahvelApi + 'static,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            accounts: Arc::new(accounts),
            tahvel: Arc::new(tahvel),
        }
    }

    pub fn fetcher(&self) -> Fetcher<'_> {
        Fetcher::new(self.tahvel.as_ref(), self.settings.tahvel.fallback_school_id)
    }
}
