//! CRUD starter kit: declarative response serializers, validation, and error mapping for JSON APIs.

pub mod config;
pub mod error;
pub mod response;
pub mod sample;
pub mod serializer;
pub mod settings;
pub mod validation;

pub use config::{load_configured, load_from_path, resolve, validate, CalculationRegistry, SerializerConfig, SerializerSet};
pub use error::{AppError, CalculationError, ConfigError};
pub use response::{created, ok, with_paged_response, with_response, Page, PageConfig, SerializedBody};
pub use serializer::{Attribute, Serializer, SerializerBuilder};
pub use settings::{init_tracing, Settings};
pub use validation::{pick, RequestValidator, ValidationRule};
