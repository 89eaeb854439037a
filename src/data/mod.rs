//! Data module - CSV reading and writing

mod loader;

pub use loader::{read_table, write_table, LoaderError};
