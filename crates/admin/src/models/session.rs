//! Session-stored editor state.

/// Session keys for the product form.
pub mod keys {
    /// Id of the product the form is currently editing.
    ///
    /// Absent when the form creates a new product.
    pub const EDIT_TARGET: &str = "edit_product_id";
}
