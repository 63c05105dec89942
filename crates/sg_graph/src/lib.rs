#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub mod cfg {
    sg_cfg::define_alias! {
        #[cfg(all(debug_assertions, feature = "debug"))] => debug,
        #[cfg(feature = "parallel")] => parallel,
    }
}

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;

pub mod compile;
pub mod context;
pub mod graph;
pub mod handlers;
pub mod info;
pub mod registry;
pub mod value;
pub mod wire;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use compile::{CompiledTable, compile};
pub use context::ResolveContext;
pub use error::{GraphError, ValueError};
pub use registry::{HandlerRegistry, TypeHandler};
