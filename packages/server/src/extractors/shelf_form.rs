use axum::extract::{FromRequest, Multipart, Request};

use crate::assets::{ImageChange, ImageUpload};
use crate::error::AppError;
use crate::store::ShelfFields;

/// Multipart body of `POST /api/shelf`.
///
/// Fields: `image` (file, optional), `id` (empty, "undefined" or "null" mean a
/// new shelf), `floor`, `location`, `side`, `item_list`, `branch_name`, and
/// `imageDeleted` ("true" clears the photo). Unknown fields, including a
/// client-sent `image_url`, are ignored.
#[derive(Debug)]
pub struct ShelfForm {
    pub id: Option<i32>,
    pub fields: ShelfFields,
    pub image: Option<ImageUpload>,
    pub image_deleted: bool,
}

impl ShelfForm {
    pub fn image_change(&mut self) -> ImageChange {
        ImageChange::from_request(self.image.take(), self.image_deleted)
    }
}

/// Parse the `id` field as sent by browser clients.
pub fn parse_shelf_id(raw: &str) -> Result<Option<i32>, AppError> {
    match raw.trim() {
        "" | "undefined" | "null" => Ok(None),
        id => id
            .parse()
            .map(Some)
            .map_err(|_| AppError::Internal(format!("Invalid shelf id: {id}"))),
    }
}

impl<S> FromRequest<S> for ShelfForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::Internal(format!("Multipart error: {}", e.body_text())))?;

        let mut form = ShelfForm {
            id: None,
            fields: ShelfFields::default(),
            image: None,
            image_deleted: false,
        };

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Internal(format!("Multipart error: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "image" {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Internal(format!("Upload read error: {e}")))?;
                // Browsers send an empty part when no file was chosen.
                if !data.is_empty() {
                    form.image = Some(ImageUpload {
                        file_name,
                        content_type,
                        data: data.to_vec(),
                    });
                }
                continue;
            }

            let text = field
                .text()
                .await
                .map_err(|e| AppError::Internal(format!("Failed to read {name}: {e}")))?;
            match name.as_str() {
                "id" => form.id = parse_shelf_id(&text)?,
                "floor" => form.fields.floor = text,
                "location" => form.fields.location = text,
                "side" => form.fields.side = text,
                "item_list" => form.fields.item_list = text,
                "branch_name" => form.fields.branch_name = text,
                "imageDeleted" => form.image_deleted = text.trim() == "true",
                _ => {} // Ignore unknown fields.
            }
        }

        Ok(form)
    }
}
