pub mod client;
pub mod endpoints;
pub mod query;
pub mod transport;

pub use client::ApiClient;
pub use query::Query;
pub use transport::{HttpResponse, Transport, UreqTransport};
