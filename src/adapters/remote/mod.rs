//! HTTP clients for the collaborator services.
//!
//! - `ParserServiceClient` - the schema parser service (form generation,
//!   element trees, rendering, validation)
//! - `CoreCmsClient` - the host CMS (Data and Template CRUD, advisory locks)

mod core_client;
mod parser_client;

pub use core_client::CoreCmsClient;
pub use parser_client::ParserServiceClient;
