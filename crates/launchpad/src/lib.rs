//! The launchpad sandbox assembler as a library.
//! Documentation and API stability are on a best-effort basis.

pub mod appconfig;
pub mod error;
pub mod json;
pub mod links;
pub mod manifest;
pub mod merge;
pub mod options;
pub mod properties;
pub mod template;

#[cfg(test)]
mod test;

pub use appconfig::assemble;
pub use appconfig::render_config;
pub use error::Error;
pub use error::Result;
pub use links::Link;
pub use links::LinkRegistry;
pub use manifest::Manifest;
pub use options::Options;
pub use properties::Bundle;
pub use template::render_page;
