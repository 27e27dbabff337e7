/// Serializable external representations of instances and solutions
pub mod ext_repr;

/// Exporting solutions out of the library
pub mod export;

/// Importing instances into the library
pub mod import;

#[doc(inline)]
pub use export::export;
#[doc(inline)]
pub use import::{ImportError, import, parse_config, parse_items};
