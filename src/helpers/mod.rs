//! Helper functions shared by the generator and the server

mod url;

pub use url::*;
