#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// Switch macros

/// Expands the provided tokens unconditionally.
///
/// With no input it evaluates to `true`, with `if { .. } else { .. }` it keeps
/// the first branch.
#[doc(hidden)]
#[macro_export]
macro_rules! enabled {
    () => { true };
    (if { $($p:tt)* } else { $($n:tt)* }) => { $($p)* };
    ($($p:tt)*) => { $($p)* };
}

/// Discards the provided tokens.
///
/// With no input it evaluates to `false`, with `if { .. } else { .. }` it keeps
/// the second branch.
#[doc(hidden)]
#[macro_export]
macro_rules! disabled {
    () => { false };
    (if { $($p:tt)* } else { $($n:tt)* }) => { $($n)* };
    ($($p:tt)*) => {};
}

// -----------------------------------------------------------------------------
// Alias definition

/// Defines one macro per `cfg` predicate, re-exported under the given name.
///
/// Every alias is either [`enabled!`] or [`disabled!`], depending on whether
/// the predicate holds in the crate that invokes `define_alias!`.
///
/// # Examples
///
/// ```
/// pub mod cfg {
///     cm_cfg::define_alias! {
///         #[cfg(debug_assertions)] => debug,
///         #[cfg(feature = "never_enabled")] => never,
///     }
/// }
///
/// cfg::never! { compile_error!("unreachable"); }
///
/// let mode = cfg::debug! { if { "debug" } else { "release" } };
/// assert!(!mode.is_empty());
/// assert!(!cfg::never!());
/// ```
#[macro_export]
macro_rules! define_alias {
    ($(#[cfg($meta:meta)] => $alias:ident),+ $(,)?) => {
        $(
            #[cfg($meta)]
            #[doc = concat!("Expands its input, `#[cfg(", stringify!($meta), ")]` is active.")]
            pub use $crate::enabled as $alias;

            #[cfg(not($meta))]
            #[doc = concat!("Discards its input, `#[cfg(", stringify!($meta), ")]` is inactive.")]
            pub use $crate::disabled as $alias;
        )+
    };
}
