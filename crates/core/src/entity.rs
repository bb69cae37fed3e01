//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Catalog records (ingredients, semifinished items, recipes) are entities:
/// composition lines point at them by id, never by value.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Human-readable name, unique within its kind.
    fn name(&self) -> &str;
}
