//! `codec` module provides the compact wire encoding for signed credentials.
//!
//! A [`Template`] names the fields a document is flattened into, the
//! [`Bridge`] packs against it and unpacks back. Templates are resolved
//! either through the shared [`TemplateCache`] or supplied inline by the
//! caller, see [`types::TemplateRef`].

pub mod types;

pub mod template;
pub use template::{FieldKind, Template, TemplateCache, TemplateField};

pub mod bridge;
pub use bridge::Bridge;
