use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role that is not scoped to a single branch.
pub const ADMIN_ROLE: &str = "admin";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
    /// Argon2 PHC string.
    pub password: String,

    pub role: String,
    pub branch_name: String,
    pub full_name: String,
}

impl Model {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

impl ActiveModelBehavior for ActiveModel {}
