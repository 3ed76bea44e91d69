use serde::{Deserialize, Serialize};

use crate::entity::shelf;

/// Query parameters for listing shelves.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShelfQuery {
    /// Branch display name.
    pub branch: Option<String>,
}

/// A shelf record.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ShelfResponse {
    #[schema(example = 5)]
    pub id: i32,
    #[schema(example = "2")]
    pub floor: String,
    #[schema(example = "A1")]
    pub location: String,
    #[schema(example = "L")]
    pub side: String,
    #[schema(example = "paper towels, tissues")]
    pub item_list: String,
    #[schema(example = "https://demo.supabase.co/storage/v1/object/public/shelf-images/Jiangong/floor2/A1/1700000000000-photo.jpg")]
    pub image_url: Option<String>,
    #[schema(example = "建工店")]
    pub branch_name: String,
}

impl From<shelf::Model> for ShelfResponse {
    fn from(model: shelf::Model) -> Self {
        Self {
            id: model.id,
            floor: model.floor,
            location: model.location,
            side: model.side,
            item_list: model.item_list,
            image_url: model.image_url,
            branch_name: model.branch_name,
        }
    }
}

/// Response to a shelf save.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SaveShelfResponse {
    #[schema(example = true)]
    pub success: bool,
    /// The shelf's image URL after the save.
    pub url: Option<String>,
}
