//! Applying visibility to the rendered list
//!
//! A filtered pass takes the container out of the layout, flips every
//! element, then puts it back, so a long list repaints once instead of
//! element by element.

use pkgsift_core::VisibilitySet;

use crate::view::CatalogView;

/// Flip every element according to `visibility`, inside a hide/reveal pair
pub fn apply<V: CatalogView + ?Sized>(view: &mut V, visibility: &VisibilitySet) {
    view.hide_container();
    for index in 0..visibility.len() {
        view.set_visible(index, visibility.is_visible(index));
    }
    view.reveal_container();
}

/// Show all `len` elements. Used when nothing is being filtered.
pub fn show_all<V: CatalogView + ?Sized>(view: &mut V, len: usize) {
    for index in 0..len {
        view.set_visible(index, true);
    }
}
