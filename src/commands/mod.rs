//! Pipeline operations and their CLI wrappers

pub mod documents;
pub mod ingest;
pub mod init;
pub mod query;
pub mod status;

pub use documents::*;
pub use ingest::*;
pub use init::*;
pub use query::*;
pub use status::*;
