//! Business logic services for admin.
//!
//! # Services
//!
//! - `catalog_editor` - Product form validation and the working copy of the
//!   overlay and custom products that admin actions mutate before saving

pub mod catalog_editor;

pub use catalog_editor::{
    CatalogEditor, EditorError, LinkField, ProductDraft, ProductForm, link_fields,
};
