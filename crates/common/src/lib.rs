#![forbid(unsafe_code)]

mod error;

pub use error::*;

/// Nome do slot onde a lista é persistida.
pub const DEFAULT_SLOT_KEY: &str = "recentlyViewedProducts";
/// Máximo de produtos mantidos na lista.
pub const DEFAULT_CAPACITY: usize = 20;
pub const DEFAULT_DATA_DIR: &str = ".recents";
