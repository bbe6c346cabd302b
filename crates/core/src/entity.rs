//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Categories and wizard sessions keep their identity while their contents change.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
