#![doc = include_str!("../README.md")]
#![no_std]

/// Defines a macro alias for each `cfg` predicate.
///
/// Every generated macro has two forms:
///
/// - `alias! { items or statements }` keeps the tokens when the predicate
///   holds and drops them otherwise.
/// - `alias! { if { .. } else { .. } }` selects one of the branches, which
///   also works in expression position.
///
/// The aliases are re-exported with `pub(crate)` visibility from the module
/// where `define_alias!` is invoked.
///
/// # Examples
///
/// ```
/// mod cfg {
///     sg_cfg::define_alias! {
///         #[cfg(debug_assertions)] => debug,
///         #[cfg(any())] => never,
///     }
/// }
///
/// let level = cfg::debug! { if { "debug" } else { "release" } };
/// assert_eq!(level, if cfg!(debug_assertions) { "debug" } else { "release" });
///
/// cfg::never! {
///     compile_error!("dropped");
/// }
/// ```
#[macro_export]
macro_rules! define_alias {
    ($(#[cfg($meta:meta)] => $name:ident),* $(,)?) => {
        $(
            $crate::__define_alias! { ($) #[cfg($meta)] => $name }
        )*
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __define_alias {
    (($d:tt) #[cfg($meta:meta)] => $name:ident) => {
        #[cfg($meta)]
        #[allow(unused_macros)]
        macro_rules! $name {
            (if { $d($d yes:tt)* } else { $d($d no:tt)* }) => { $d($d yes)* };
            ($d($d tokens:tt)*) => { $d($d tokens)* };
        }

        #[cfg(not($meta))]
        #[allow(unused_macros)]
        macro_rules! $name {
            (if { $d($d yes:tt)* } else { $d($d no:tt)* }) => { $d($d no)* };
            ($d($d tokens:tt)*) => {};
        }

        #[allow(unused_imports)]
        pub(crate) use $name;
    };
}
