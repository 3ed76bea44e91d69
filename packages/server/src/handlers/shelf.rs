use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::{debug, info, instrument, warn};

use crate::assets::{ShelfSlot, Upserted};
use crate::error::{AppError, ErrorBody};
use crate::extractors::shelf_form::ShelfForm;
use crate::models::shelf::{SaveShelfResponse, ShelfQuery, ShelfResponse};
use crate::models::user::SuccessResponse;
use crate::state::AppState;
use crate::store;

#[utoipa::path(
    get,
    path = "/shelf",
    tag = "Shelves",
    operation_id = "listShelves",
    summary = "List the shelves of a branch",
    description = "Returns the branch's shelves ordered by floor, then location.",
    params(ShelfQuery),
    responses(
        (status = 200, description = "Shelf list", body = Vec<ShelfResponse>),
        (status = 500, description = "Missing branch or internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(branch = ?query.branch))]
pub async fn list_shelves(
    State(state): State<AppState>,
    Query(query): Query<ShelfQuery>,
) -> Result<Json<Vec<ShelfResponse>>, AppError> {
    let branch = query
        .branch
        .ok_or_else(|| AppError::Internal("Query parameter 'branch' is missing".into()))?;

    let shelves = store::list_shelves_by_branch(&state.db, &branch).await?;
    Ok(Json(shelves.into_iter().map(ShelfResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/shelf",
    tag = "Shelves",
    operation_id = "saveShelf",
    summary = "Create or update a shelf",
    description = "Creates a shelf when `id` is absent, otherwise updates it. A file in `image` \
        replaces the photo; `imageDeleted=true` without a file clears it; otherwise the photo \
        is kept. A replaced or cleared photo is removed from storage on a best-effort basis.",
    request_body(content_type = "multipart/form-data", description = "Shelf fields with optional `image` file"),
    responses(
        (status = 200, description = "Shelf saved", body = SaveShelfResponse),
        (status = 500, description = "Malformed form, upload or database failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, form), fields(shelf_id = ?form.id, branch = %form.fields.branch_name))]
pub async fn save_shelf(
    State(state): State<AppState>,
    form: ShelfForm,
) -> Result<Json<SaveShelfResponse>, AppError> {
    let saved = upsert_shelf(&state, form).await?;
    debug!(cleanup = ?saved.cleanup, "Shelf save finished");

    Ok(Json(SaveShelfResponse {
        success: true,
        url: saved.value,
    }))
}

#[utoipa::path(
    delete,
    path = "/shelf/{id}",
    tag = "Shelves",
    operation_id = "deleteShelf",
    summary = "Delete a shelf",
    description = "Removes the shelf's photo from storage on a best-effort basis, then deletes \
        the shelf whether or not the photo could be removed.",
    params(("id" = i32, Path, description = "Shelf ID")),
    responses(
        (status = 200, description = "Shelf deleted", body = SuccessResponse),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_shelf(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponse>, AppError> {
    let removed = remove_shelf(&state, id).await?;
    debug!(cleanup = ?removed.cleanup, "Shelf delete finished");

    Ok(Json(SuccessResponse::ok()))
}

/// Resolve the photo, write the record, then drop the superseded photo.
///
/// Returns the record's image URL after the save, `None` when `id` matched no
/// shelf (any upload is discarded in that case).
pub async fn upsert_shelf(
    state: &AppState,
    mut form: ShelfForm,
) -> Result<Upserted<Option<String>>, AppError> {
    let previous = match form.id {
        Some(id) => store::find_image_url(&state.db, id)
            .await
            .unwrap_or_else(|e| {
                warn!(shelf_id = id, error = %e, "Could not look up current image; treating as none");
                None
            }),
        None => None,
    };

    let change = form.image_change();
    let slot = ShelfSlot {
        branch_name: &form.fields.branch_name,
        floor: &form.fields.floor,
        location: &form.fields.location,
    };
    let resolved = state
        .assets
        .resolve(change, slot, previous.as_deref())
        .await?;

    let written = match form.id {
        Some(id) => store::update_shelf(&state.db, id, form.fields, resolved.image_url.clone())
            .await
            .map(|rows| {
                info!(shelf_id = id, rows, "Shelf updated");
                rows > 0
            }),
        None => store::insert_shelf(&state.db, form.fields, resolved.image_url.clone())
            .await
            .map(|shelf| {
                info!(shelf_id = shelf.id, "Shelf created");
                true
            }),
    };

    match written {
        // The record still references the old photo; only the new upload is orphaned.
        Err(e) => {
            state.assets.cleanup(resolved.uploaded.as_deref()).await;
            Err(e.into())
        }
        // No row carries the new URL, so the upload must not outlive the request.
        Ok(false) => {
            warn!(shelf_id = ?form.id, "No shelf with this id; discarding upload");
            let cleanup = state.assets.cleanup(resolved.uploaded.as_deref()).await;
            Ok(Upserted {
                value: None,
                cleanup,
            })
        }
        Ok(true) => {
            let cleanup = state.assets.cleanup(resolved.superseded.as_deref()).await;
            Ok(Upserted {
                value: resolved.image_url,
                cleanup,
            })
        }
    }
}

/// Drop the shelf's photo (best-effort), then delete the row.
pub async fn remove_shelf(state: &AppState, id: i32) -> Result<Upserted<u64>, AppError> {
    let image_url = store::find_image_url(&state.db, id)
        .await
        .unwrap_or_else(|e| {
            warn!(shelf_id = id, error = %e, "Could not look up image of shelf being deleted");
            None
        });

    let cleanup = state.assets.cleanup(image_url.as_deref()).await;
    let rows = store::delete_shelf(&state.db, id).await?;
    info!(shelf_id = id, rows, "Shelf deleted");

    Ok(Upserted {
        value: rows,
        cleanup,
    })
}
