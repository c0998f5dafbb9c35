pub mod helper;

mod error;
pub use error::Error;
