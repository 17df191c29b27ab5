//! Accessors for optional values.
//!
//! The optional-value type is [`core::option::Option`]. Its variants form a
//! closed sum, matching is checked for exhaustiveness by the compiler, and
//! `is_some` / `is_none` / `map` / `==` already behave as required:
//!
//! - `Some(v).map(f) == Some(f(v))`, and `None.map(f)` never calls `f`.
//! - Two options are equal iff both are `None`, or both are `Some` with
//!   equal payloads.
//!
//! [`OptionExt`] adds the accessors whose misuse must be fatal rather than
//! silently wrong, plus an eager defaulting accessor.
//!
//! # Example
//!
//! ```
//! use lockbound::option::OptionExt;
//!
//! let mut slot = Some(String::from("brane"));
//! slot.value_mut().push_str("-engine");
//! assert_eq!(slot.value(), "brane-engine");
//!
//! let missing: Option<u32> = None;
//! assert_eq!(missing.value_or_default(7), 7);
//! ```

use crate::error::{ContractViolation, fatal};

/// Engine accessors for [`Option`].
pub trait OptionExt<V> {
    /// Returns a reference to the payload.
    ///
    /// # Panics
    ///
    /// Panics through [`fatal`] with
    /// [`ContractViolation::EmptyOption`] if the option is `None`.
    fn value(&self) -> &V;

    /// Returns a mutable reference to the payload.
    ///
    /// # Panics
    ///
    /// Panics through [`fatal`] with
    /// [`ContractViolation::EmptyOption`] if the option is `None`.
    fn value_mut(&mut self) -> &mut V;

    /// Consumes the option, returning the payload or `default`.
    ///
    /// `default` is evaluated by the caller before the call whether or not
    /// it is used.
    fn value_or_default(self, default: V) -> V;
}

impl<V> OptionExt<V> for Option<V> {
    #[inline]
    #[track_caller]
    fn value(&self) -> &V {
        match self {
            Some(value) => value,
            None => fatal(ContractViolation::EmptyOption),
        }
    }

    #[inline]
    #[track_caller]
    fn value_mut(&mut self) -> &mut V {
        match self {
            Some(value) => value,
            None => fatal(ContractViolation::EmptyOption),
        }
    }

    #[inline]
    fn value_or_default(self, default: V) -> V {
        match self {
            Some(value) => value,
            None => default,
        }
    }
}
