//! Backend resolver pipeline: variant payloads, HTTP client, fan-out.

pub mod client;
pub mod fanout;
pub mod payload;
