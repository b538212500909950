//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Identity is assigned by the remote service; an entity that has not been
/// persisted yet has no id. Equality is by id once both sides carry one, and
/// by full field value before that (used only in tests).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if persisted.
    fn id(&self) -> Option<Self::Id>;

    /// Whether the remote service has assigned an identifier.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
