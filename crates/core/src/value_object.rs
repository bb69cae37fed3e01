//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attributes.
/// Composition lines are value objects: a recipe line is just "this much of
/// that ingredient", owned by its container and replaced wholesale on edit.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
