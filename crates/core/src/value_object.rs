//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" a
/// value object, build a new one. `DateRange` is the canonical example in
/// this codebase: two ranges with the same endpoints are the same value.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
