pub mod convert;
pub mod dictionary;
pub mod error;
pub mod favorites;
pub mod preprocess;
pub mod script;
pub mod types;
