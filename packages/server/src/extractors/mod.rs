pub mod json;
pub mod shelf_form;
