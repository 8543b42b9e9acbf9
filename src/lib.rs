//! ngcli: generate and manage nginx configurations from parameterized templates.
//!
//! The template core is usable as a library:
//!
//! ```no_run
//! use ngcli::{Parameters, Template};
//! use std::path::Path;
//!
//! let template = Template::load("prod", Path::new("/home/me/.ngcli/templates"))?;
//! let mut params = Parameters::new();
//! params.insert("domain".into(), "example.com".into());
//! let config = template.render_validated(&params)?;
//! # Ok::<(), ngcli::AppError>(())
//! ```

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use adapters::Template;
pub use adapters::template_engine::{list_templates, validate_file, validate_syntax};
pub use domain::template::{
    InvalidParameter, ParameterInfo, ParameterType, Parameters, TemplateMetadata,
    ValidationError, parse,
};
pub use domain::{AppError, parse_set_flags};
