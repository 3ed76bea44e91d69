use std::sync::Arc;

use common::storage::ObjectStore;
use sea_orm::DatabaseConnection;

use crate::assets::ImageAssets;
use crate::config::AppConfig;
use crate::utils::branch::BranchMap;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub assets: Arc<ImageAssets>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig, store: Arc<dyn ObjectStore>) -> Self {
        let branches = BranchMap::with_overrides(&config.branches);
        let assets = ImageAssets::new(store, &config.storage.public_base_url, branches);
        Self {
            db,
            config: Arc::new(config),
            assets: Arc::new(assets),
        }
    }
}
