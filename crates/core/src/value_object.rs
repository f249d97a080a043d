//! Value object trait: equality by value, not identity.
//!
//! Everything the layout engine handles (line items, totals, geometries, page
//! blocks) is a value object owned by a single document-generation call.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. Nothing in a document build is shared or mutated behind
/// the caller's back, which is what lets documents be generated on separate
/// threads without coordination.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Margins { top: f32, bottom: f32 }
///
/// impl ValueObject for Margins {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
