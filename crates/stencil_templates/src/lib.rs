//! # stencil_templates
//!
//! Template parsing, variable substitution, and prompt generation.
//!
//! Templates are plain text with `{name}` placeholders:
//!
//! - `{name}` is replaced with the value of `name`, HTML-escaped unless
//!   `name` is a raw markdown key
//! - `\{name\}` renders as a literal `{name}`
//! - `{outer_{inner}}` is passed through untouched
//! - a placeholder with no value is removed and reported, not an error
//!
//! ## Example
//!
//! ```rust
//! use stencil_templates::{
//!     GenerateOptions, PromptManager, StencilConfig, TemplateInput, VariableMap,
//! };
//!
//! let manager = PromptManager::local(&StencilConfig::default());
//! let variables = VariableMap::new().with("name", "John").with("age", "30");
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let generated = runtime
//!     .block_on(manager.generate_prompt(
//!         &TemplateInput::inline("Hello {name}, you are {age} years old."),
//!         &variables,
//!         &GenerateOptions::default(),
//!     ))
//!     .unwrap();
//!
//! assert_eq!(generated.prompt, "Hello John, you are 30 years old.");
//! assert!(generated.unknown_variables.is_empty());
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod fs;
pub mod manager;
pub mod parser;
pub mod sections;
pub mod substitutor;
pub mod token;
pub mod variables;

pub use catalog::{TemplateCatalog, TemplateEntry};
pub use config::{ConfigError, GenerateOptions, MissingPolicy, StencilConfig, CONFIG_FILE};
pub use error::{ErrorKind, FsError, PromptError, PromptResult};
pub use fs::{LocalFs, OutputSink, TemplateSource};
pub use manager::{GeneratedPrompt, PromptManager, SubstitutionResult, TemplateInput};
pub use parser::{ParsedTemplate, TemplateParser};
pub use sections::{Section, SectionAnalyzer};
pub use substitutor::{html_escape, SubstituteOptions, Substitution, VariableSubstitutor};
pub use token::{tokenize, Token};
pub use variables::VariableMap;
