pub mod error;
pub mod identifiers;
pub mod layout;
pub mod set_flags;
pub mod settings;
pub mod template;

pub use error::AppError;
pub use identifiers::{validate_config_name, validate_template_name};
pub use layout::ServerLayout;
pub use set_flags::parse_set_flags;
pub use settings::Settings;
pub use template::{ParameterInfo, ParameterType, Parameters, TemplateMetadata, ValidationError};
