mod error;
mod json_file;
mod traits;

pub use error::StoreError;
pub use json_file::JsonFileSource;
pub use traits::CallSource;
