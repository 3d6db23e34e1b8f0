//! Shared state behind the REST handlers
//!
//! Holds the generator config, the session seed and the memoized dashboards.

use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::assets::LogoAsset;
use crate::config::GeneratorConfig;
use crate::dashboard::{DashboardTables, GenerationCache, GenerationKey};
use crate::error::Result;

// ============================================================================
// Dashboard Service
// ============================================================================

pub struct DashboardService {
    config: GeneratorConfig,
    session_seed: u64,
    /// Fixed reference date; the local date is used when unset
    today: Option<NaiveDate>,
    logo: Option<LogoAsset>,
    cache: Arc<RwLock<GenerationCache>>,
}

impl DashboardService {
    pub fn new(config: GeneratorConfig, session_seed: u64) -> Self {
        Self {
            config,
            session_seed,
            today: None,
            logo: None,
            cache: Arc::new(RwLock::new(GenerationCache::default())),
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn with_logo(mut self, logo: LogoAsset) -> Self {
        self.logo = Some(logo);
        self
    }

    pub fn session_seed(&self) -> u64 {
        self.session_seed
    }

    pub fn logo(&self) -> Option<&LogoAsset> {
        self.logo.as_ref()
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Tables for `seed` (or the session seed), generated at most once per key
    pub async fn dashboard(&self, seed: Option<u64>) -> Result<Arc<DashboardTables>> {
        let key = GenerationKey {
            config: self.config.clone(),
            seed: seed.unwrap_or(self.session_seed),
            today: self.reference_date(),
        };

        // Check cache first
        {
            let cache = self.cache.read().await;
            if let Some(tables) = cache.get(&key) {
                return Ok(tables);
            }
        }

        let mut cache = self.cache.write().await;
        cache.get_or_generate(key)
    }

    pub async fn cached_dashboards(&self) -> usize {
        self.cache.read().await.len()
    }
}
