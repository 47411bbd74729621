pub mod codec;
pub mod config;
pub mod embedded;
pub mod error;
pub mod metadata;
pub mod value;
