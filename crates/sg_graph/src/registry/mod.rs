//! Provide the handler registry, the dispatch point over type shapes.
//!
//! ## Menu
//!
//! - [`TypeHandler`]: A strategy for one shape of type descriptor.
//! - [`HandlerRegistry`]: An ordered list of handlers, the first match wins.
//!
//! Built-in handlers live in [`handlers`](crate::handlers),
//! [`HandlerRegistry::new`] registers all of them.

// -----------------------------------------------------------------------------
// Modules

mod handler;
mod handler_registry;

// -----------------------------------------------------------------------------
// Exports

pub use handler::TypeHandler;
pub use handler_registry::HandlerRegistry;
