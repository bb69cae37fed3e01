//! Read-only constituent resolution used by the cost engine.

use menucost_core::{IngredientId, SemifinishedId};

use crate::ingredient::Ingredient;
use crate::semifinished::Semifinished;

/// Resolves composition-line references against a loaded snapshot.
///
/// `None` means the reference dangles. Callers must treat that as "no data",
/// not as a failure.
pub trait CatalogLookup {
    fn ingredient(&self, id: &IngredientId) -> Option<&Ingredient>;
    fn semifinished(&self, id: &SemifinishedId) -> Option<&Semifinished>;
}

impl<T> CatalogLookup for &T
where
    T: CatalogLookup + ?Sized,
{
    fn ingredient(&self, id: &IngredientId) -> Option<&Ingredient> {
        (**self).ingredient(id)
    }

    fn semifinished(&self, id: &SemifinishedId) -> Option<&Semifinished> {
        (**self).semifinished(id)
    }
}
