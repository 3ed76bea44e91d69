//! Record store queries for shelves and users.
//!
//! Every function takes any `ConnectionTrait` so callers can run them on the
//! pool or inside a transaction.

use sea_orm::sea_query::Expr;
use sea_orm::*;

use crate::entity::{shelf, user};

/// Shelf columns supplied by a save request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShelfFields {
    pub floor: String,
    pub location: String,
    pub side: String,
    pub item_list: String,
    pub branch_name: String,
}

/// Shelves of a branch ordered by floor, then location.
pub async fn list_shelves_by_branch<C: ConnectionTrait>(
    db: &C,
    branch_name: &str,
) -> Result<Vec<shelf::Model>, DbErr> {
    shelf::Entity::find()
        .filter(shelf::Column::BranchName.eq(branch_name))
        .order_by_asc(shelf::Column::Floor)
        .order_by_asc(shelf::Column::Location)
        .all(db)
        .await
}

pub async fn find_shelf<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<shelf::Model>, DbErr> {
    shelf::Entity::find_by_id(id).one(db).await
}

/// Current `image_url` of a shelf; `None` when the shelf has no photo or does not exist.
pub async fn find_image_url<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<String>, DbErr> {
    Ok(find_shelf(db, id).await?.and_then(|shelf| shelf.image_url))
}

pub async fn insert_shelf<C: ConnectionTrait>(
    db: &C,
    fields: ShelfFields,
    image_url: Option<String>,
) -> Result<shelf::Model, DbErr> {
    shelf::ActiveModel {
        floor: Set(fields.floor),
        location: Set(fields.location),
        side: Set(fields.side),
        item_list: Set(fields.item_list),
        image_url: Set(image_url),
        branch_name: Set(fields.branch_name),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Unconditional update; the branch of an existing shelf never changes.
///
/// Returns the number of rows updated (0 when `id` does not exist).
pub async fn update_shelf<C: ConnectionTrait>(
    db: &C,
    id: i32,
    fields: ShelfFields,
    image_url: Option<String>,
) -> Result<u64, DbErr> {
    let result = shelf::Entity::update_many()
        .col_expr(shelf::Column::Floor, Expr::value(fields.floor))
        .col_expr(shelf::Column::Location, Expr::value(fields.location))
        .col_expr(shelf::Column::Side, Expr::value(fields.side))
        .col_expr(shelf::Column::ItemList, Expr::value(fields.item_list))
        .col_expr(shelf::Column::ImageUrl, Expr::value(image_url))
        .filter(shelf::Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_shelf<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbErr> {
    let result = shelf::Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected)
}

/// All users ordered by id.
pub async fn list_users<C: ConnectionTrait>(db: &C) -> Result<Vec<user::Model>, DbErr> {
    user::Entity::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
}

pub async fn find_user_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
}

/// Columns of a new user account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    /// Argon2 PHC string, never the plaintext password.
    pub password_hash: String,
    pub role: String,
    pub branch_name: String,
    pub full_name: String,
}

pub async fn insert_user<C: ConnectionTrait>(
    db: &C,
    new_user: NewUser,
) -> Result<user::Model, DbErr> {
    user::ActiveModel {
        username: Set(new_user.username),
        password: Set(new_user.password_hash),
        role: Set(new_user.role),
        branch_name: Set(new_user.branch_name),
        full_name: Set(new_user.full_name),
        ..Default::default()
    }
    .insert(db)
    .await
}
