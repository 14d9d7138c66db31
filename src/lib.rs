pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod io;
pub mod memory;
pub mod page_table;
pub mod translation;

// Re-export commonly used items for convenience
pub use config::PagerConfig;
pub use engine::{PagingEngine, PagingStats};
pub use error::{PagingError, Result};
pub use translation::{AddressTranslator, VirtualAddress};
