use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One physical shelf slot in a branch and its current contents.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shelf")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub floor: String,
    pub location: String,
    pub side: String,

    #[sea_orm(column_type = "Text")]
    pub item_list: String,

    /// Public URL of the shelf photo. Only ever points into the configured
    /// storage domain or is null.
    #[sea_orm(column_type = "Text")]
    pub image_url: Option<String>,

    #[sea_orm(indexed)]
    pub branch_name: String,
}

impl ActiveModelBehavior for ActiveModel {}
