pub mod embedded_payload;
pub mod environment;
