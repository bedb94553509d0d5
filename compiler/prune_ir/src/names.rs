//! Well-known unit and member names.
//!
//! These names are pre-interned by every [`StringInterner`](crate::StringInterner)
//! in the order of [`WELL_KNOWN`], so each gets a fixed [`Name`] constant.
//! The extractor and the analyzer refer to the runtime-support units through
//! these constants without needing an interner.

use crate::Name;

macro_rules! well_known {
    ($($(#[$meta:meta])* $ident:ident = $text:literal;)*) => {
        /// Texts of all well-known names, in pre-interning order.
        pub const WELL_KNOWN: &[&str] = &[$($text),*];

        well_known!(@consts 1u32, $($(#[$meta])* $ident,)*);
    };
    (@consts $idx:expr, $(#[$meta:meta])* $ident:ident, $($rest:tt)*) => {
        $(#[$meta])*
        pub const $ident: Name = Name::from_raw($idx);
        well_known!(@consts $idx + 1u32, $($rest)*);
    };
    (@consts $idx:expr,) => {};
}

well_known! {
    /// Root of the class hierarchy; target of every call on the top type.
    OBJECT_CLASS = "lang.Object";
    /// Boxed wrapper for the unit/undefined value.
    BOXED_UNIT_CLASS = "lang.BoxedUnit";
    BOXED_BOOLEAN_CLASS = "lang.Boolean";
    BOXED_CHAR_CLASS = "lang.Character";
    BOXED_BYTE_CLASS = "lang.Byte";
    BOXED_SHORT_CLASS = "lang.Short";
    BOXED_INT_CLASS = "lang.Integer";
    BOXED_LONG_CLASS = "lang.Long";
    BOXED_FLOAT_CLASS = "lang.Float";
    BOXED_DOUBLE_CLASS = "lang.Double";
    BOXED_STRING_CLASS = "lang.String";
    /// Raised by integer division or remainder by zero.
    ARITHMETIC_EXCEPTION_CLASS = "lang.ArithmeticException";
    /// No-argument constructor; the singleton constructor of modules.
    NO_ARG_CONSTRUCTOR = "<init>";
    /// Constructor taking a message string.
    STRING_ARG_CONSTRUCTOR = "<init>(lang.String)";
    /// Static initializer, run when its unit is first needed.
    STATIC_INITIALIZER = "<clinit>";
    /// Array-specific clone, always provided by the runtime support layer.
    CLONE_METHOD = "clone";
    /// Synthetic member holding the dependencies of a unit's top-level exports.
    TOP_LEVEL_EXPORTS = "<exports>";
}

/// Number of pre-interned well-known names (excluding the empty string).
pub const WELL_KNOWN_COUNT: usize = WELL_KNOWN.len();
