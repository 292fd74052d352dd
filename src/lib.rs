//! # slicecms
//!
//! A headless content management backend. Content types and slices are
//! described by JSON schemas; documents are composed of slice instances and
//! move between draft and published. Uploaded assets are stored on disk.
//!
//! The crate is organized into:
//!
//! * `schema` - schema model and structural validation
//! * `document` - document payloads and slice data checks
//! * `db_operations` - entity stores over sled
//! * `services` - business operations over the stores
//! * `webhook` - slice lifecycle events and their HTTP delivery
//! * `assets` - upload naming, MIME filtering and disk storage
//! * `cms_node` - configuration and the HTTP server
//! * `logging` - the logging system

pub mod assets;
pub mod cms_node;
pub mod constants;
pub mod db_operations;
pub mod document;
pub mod error;
pub mod logging;
pub mod schema;
pub mod services;
pub mod webhook;

pub use cms_node::{load_cms_config, CmsConfig, CmsHttpServer};
pub use db_operations::DbOperations;
pub use error::{CmsError, CmsResult};
pub use services::CmsServices;
