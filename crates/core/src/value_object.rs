//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Variants, combination records, and discounts are value objects: two with the
/// same attributes are interchangeable, and "editing" one produces a new value.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Discount {
///     method: DiscountMethod,
///     value: u64,
/// }
///
/// impl ValueObject for Discount {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
