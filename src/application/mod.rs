// Application layer - the ledger operations offered to front ends
// and the response payloads they render.

pub mod error;
pub mod response;
pub mod service;

pub use error::*;
pub use response::*;
pub use service::*;
