//! Range types for arena-allocated sequences.
//!
//! Sequences (operand lists, subscripts, statement bodies, keyword
//! arguments) are stored flattened in side pools; nodes reference them by
//! a compact `{start, len}` pair instead of owning a `Vec`.

/// Macro to define range types for arena-allocated data.
///
/// Each generated type has:
/// - `start: u32` and `len: u16` fields
/// - an `EMPTY` constant
/// - `new()`, `is_empty()`, `len()` methods
/// - a `Debug` implementation showing the range as `TypeName(start..end)`
macro_rules! define_range {
    ($($name:ident),* $(,)?) => { $(
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
        #[repr(C)]
        pub struct $name {
            pub start: u32,
            pub len: u16,
        }

        impl $name {
            pub const EMPTY: Self = Self { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u16) -> Self {
                Self { start, len }
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({}..{})", stringify!($name), self.start, self.start + u32::from(self.len))
            }
        }
    )* };
}

define_range!(ExprRange, OpRange, KwArgRange, StmtRange);

// repr(C) pins the layout: 4-byte start, 2-byte len, 2 bytes padding.
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ExprRange, KwArgRange, OpRange, StmtRange};
    crate::static_assert_size!(ExprRange, 8);
    crate::static_assert_size!(OpRange, 8);
    crate::static_assert_size!(KwArgRange, 8);
    crate::static_assert_size!(StmtRange, 8);
}
