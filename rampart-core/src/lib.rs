//! Core types for Rampart
//!
//! Provides the request abstraction validators read from, the response type
//! used to report failures, the shared error type and logging setup.
//!
//! ```
//! use rampart_core::{HttpRequest, ParamSource};
//!
//! let req = HttpRequest::from_uri("POST", "/signup?ref=home")
//!     .unwrap()
//!     .with_form_body("email=john%40example.com&age=");
//!
//! assert_eq!(req.get_param("email"), "john@example.com");
//! assert_eq!(req.get_param("age"), "");
//! assert_eq!(req.get_param("ref"), "home");
//! assert!(req.get_param("missing").is_null());
//! ```

pub mod error;
pub mod form;
pub mod http;
pub mod logging;
pub mod params;

pub use error::{Error, Result};
pub use form::{parse_form_params, parse_query_string};
pub use http::{HttpRequest, HttpResponse};
pub use params::ParamSource;
