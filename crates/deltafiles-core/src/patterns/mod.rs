//! Path filtering

pub mod extensions;

pub use extensions::{extension_of, ExtensionFilter};
