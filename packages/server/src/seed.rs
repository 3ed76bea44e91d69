use sea_orm::sea_query::Index;
use sea_orm::*;
use tracing::{info, warn};

use crate::config::BootstrapAdmin;
use crate::entity::{shelf, user};
use crate::store::{self, NewUser};
use crate::utils::hash;

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Composite index for the branch listing:
    // SELECT * FROM shelf WHERE branch_name = ? ORDER BY floor, location
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_shelf_branch_floor_location")
        .table(shelf::Entity)
        .col(shelf::Column::BranchName)
        .col(shelf::Column::Floor)
        .col(shelf::Column::Location)
        .to_owned();

    let backend = db.get_database_backend();
    match db.execute_raw(backend.build(&stmt)).await {
        Ok(_) => info!("Ensured index idx_shelf_branch_floor_location exists"),
        Err(e) => warn!(
            "Failed to create index idx_shelf_branch_floor_location: {}",
            e
        ),
    }

    Ok(())
}

/// Create the configured admin account unless its username is already taken.
pub async fn bootstrap_admin(db: &DatabaseConnection, admin: &BootstrapAdmin) -> Result<(), DbErr> {
    if store::find_user_by_username(db, &admin.username)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let password_hash = hash::hash_password(&admin.password)
        .map_err(|e| DbErr::Custom(format!("Password hash error: {e}")))?;

    let created = store::insert_user(
        db,
        NewUser {
            username: admin.username.clone(),
            password_hash,
            role: user::ADMIN_ROLE.to_string(),
            branch_name: String::new(),
            full_name: admin.full_name.clone(),
        },
    )
    .await?;

    info!(user_id = created.id, username = %created.username, "Created bootstrap admin");
    Ok(())
}
