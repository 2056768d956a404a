//! Prompt generation pipeline.
//!
//! [`PromptManager`] is the single entry point the rest of an application
//! depends on. A call runs these steps, stopping at the first failure:
//!
//! 1. the template source is non-empty and, if a path, a valid relative path
//! 2. every variable key is a legal name
//! 3. every path-like value (`*_file`, `*_path`) is a valid relative path
//!    (and exists, when required)
//! 4. every value is a string (and raw markdown values are valid markdown,
//!    when required)
//! 5. the template is loaded
//! 6. placeholders are checked, then substituted
//! 7. the prompt is checked as markdown, when required
//! 8. the prompt is split into sections, in structured mode
//! 9. the prompt is written out, when a destination is given
//!
//! Nothing is written unless every earlier step succeeded.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use stencil_validate::{
    is_path_like_key, ValidationError, ValidationReport, ValidationResult, Validators,
};
use tracing::{debug, info, warn};

use crate::config::{GenerateOptions, MissingPolicy, StencilConfig};
use crate::error::{ErrorKind, PromptResult};
use crate::fs::{LocalFs, OutputSink, TemplateSource};
use crate::parser::TemplateParser;
use crate::sections::{Section, SectionAnalyzer};
use crate::substitutor::VariableSubstitutor;
use crate::variables::{value_kind, VariableMap};

/// Where template text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateInput {
    /// A relative path read through the template source.
    Path(String),
    /// Template text supplied directly.
    Inline(String),
}

impl TemplateInput {
    pub fn path(path: impl Into<String>) -> Self {
        TemplateInput::Path(path.into())
    }

    pub fn inline(text: impl Into<String>) -> Self {
        TemplateInput::Inline(text.into())
    }
}

impl fmt::Display for TemplateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateInput::Path(path) => write!(f, "{}", path),
            TemplateInput::Inline(_) => write!(f, "<inline>"),
        }
    }
}

/// A successfully generated prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPrompt {
    pub prompt: String,
    /// Referenced but unsupplied variables, in order of first appearance.
    pub unknown_variables: Vec<String>,
    /// Sections of the prompt; empty unless structured mode was requested.
    pub sections: Vec<Section>,
    /// Where the prompt was written, if it was.
    pub output_path: Option<PathBuf>,
}

/// The public result shape: success with the prompt, or failure with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionResult {
    Success {
        prompt: String,
        unknown_variables: Vec<String>,
    },
    Failure {
        error: String,
        kind: ErrorKind,
    },
}

impl SubstitutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubstitutionResult::Success { .. })
    }
}

impl SubstitutionResult {
    /// The public shape of a generation result, leaving the result usable.
    pub fn from_result(result: &PromptResult<GeneratedPrompt>) -> Self {
        match result {
            Ok(generated) => SubstitutionResult::Success {
                prompt: generated.prompt.clone(),
                unknown_variables: generated.unknown_variables.clone(),
            },
            Err(err) => SubstitutionResult::Failure {
                kind: err.kind(),
                error: err.to_string(),
            },
        }
    }
}

impl From<PromptResult<GeneratedPrompt>> for SubstitutionResult {
    fn from(result: PromptResult<GeneratedPrompt>) -> Self {
        Self::from_result(&result)
    }
}

impl Serialize for SubstitutionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SubstitutionResult::Success {
                prompt,
                unknown_variables,
            } => {
                let mut s = serializer.serialize_struct("SubstitutionResult", 3)?;
                s.serialize_field("success", &true)?;
                s.serialize_field("prompt", prompt)?;
                s.serialize_field("unknownVariables", unknown_variables)?;
                s.end()
            }
            SubstitutionResult::Failure { error, kind } => {
                let mut s = serializer.serialize_struct("SubstitutionResult", 3)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("error", error)?;
                s.serialize_field("kind", kind)?;
                s.end()
            }
        }
    }
}

/// Orchestrates validation, loading, substitution, and output.
///
/// The manager holds no per-call state; one instance can serve any number
/// of concurrent calls.
#[derive(Clone)]
pub struct PromptManager {
    validators: Validators,
    source: Arc<dyn TemplateSource>,
    sink: Arc<dyn OutputSink>,
}

impl PromptManager {
    /// Create a manager over explicit collaborators with standard validators.
    pub fn new(source: Arc<dyn TemplateSource>, sink: Arc<dyn OutputSink>) -> Self {
        Self {
            validators: Validators::standard(),
            source,
            sink,
        }
    }

    /// Create a manager over the local directories named in `config`.
    pub fn local(config: &StencilConfig) -> Self {
        let source = LocalFs::new(&config.templates_dir);
        let sink = LocalFs::new(&config.output_dir).create_dirs(config.create_dirs);
        Self::new(Arc::new(source), Arc::new(sink))
    }

    pub fn with_validators(mut self, validators: Validators) -> Self {
        self.validators = validators;
        self
    }

    pub fn validators(&self) -> &Validators {
        &self.validators
    }

    /// Generate a prompt, returning the closed success/failure shape.
    pub async fn generate(
        &self,
        input: &TemplateInput,
        variables: &VariableMap,
        options: &GenerateOptions,
    ) -> SubstitutionResult {
        self.generate_prompt(input, variables, options).await.into()
    }

    /// Generate a prompt.
    pub async fn generate_prompt(
        &self,
        input: &TemplateInput,
        variables: &VariableMap,
        options: &GenerateOptions,
    ) -> PromptResult<GeneratedPrompt> {
        debug!("Generating prompt from {}", input);

        self.check_source(input)?;
        if let Some(err) = self.shape_errors(variables).next() {
            return Err(err.into());
        }
        if options.require_existing_paths {
            self.check_paths_exist(variables).await?;
        }
        if let Some(err) = self.value_errors(variables, options).next() {
            return Err(err.into());
        }
        let values = variables.to_string_map()?;

        let template = match input {
            TemplateInput::Path(path) => self.source.read_text(path).await?,
            TemplateInput::Inline(text) => text.clone(),
        };

        let mut generated = self.render(&template, &values, options)?;

        if let Some(destination) = &options.output {
            generated.output_path = Some(self.write_output(destination, &generated.prompt).await?);
        }

        info!(
            "Generated prompt from {} ({} bytes)",
            input,
            generated.prompt.len()
        );
        Ok(generated)
    }

    /// Substitute into already-loaded template text (steps 6 to 8).
    pub fn render(
        &self,
        template: &str,
        values: &HashMap<String, String>,
        options: &GenerateOptions,
    ) -> ValidationResult<GeneratedPrompt> {
        if template.trim().is_empty() {
            return Err(ValidationError::EmptyTemplate);
        }

        if let Some(bad) = TemplateParser::names_in_order(template)
            .into_iter()
            .find(|name| !self.validators.names.is_valid_name(name))
        {
            return Err(ValidationError::InvalidPlaceholderName(bad.to_string()));
        }

        if options.missing == MissingPolicy::Reject && !options.preserve_placeholders {
            let missing: Vec<String> = TemplateParser::names_in_order(template)
                .into_iter()
                .filter(|name| !values.contains_key(*name))
                .map(String::from)
                .collect();
            if !missing.is_empty() {
                return Err(ValidationError::MissingVariables(missing));
            }
        }

        let substitution =
            VariableSubstitutor::substitute(template, values, &options.substitute_options());
        if !substitution.unknown_variables.is_empty() {
            warn!(
                "Template references unknown variables: {}",
                substitution.unknown_variables.join(", ")
            );
        }

        if options.validate_output {
            self.validators
                .markdown
                .check_markdown(&substitution.output)
                .map_err(|issue| ValidationError::InvalidMarkdown {
                    subject: "generated prompt".to_string(),
                    issue,
                })?;
        }

        let sections = if options.structured {
            SectionAnalyzer::analyze(&substitution.output)?
        } else {
            Vec::new()
        };

        Ok(GeneratedPrompt {
            prompt: substitution.output,
            unknown_variables: substitution.unknown_variables,
            sections,
            output_path: None,
        })
    }

    /// Validate a destination and write content to it.
    pub async fn write_output(&self, destination: &str, content: &str) -> PromptResult<PathBuf> {
        self.validators
            .paths
            .check_path(destination)
            .map_err(|issue| ValidationError::InvalidOutputPath {
                path: destination.to_string(),
                issue,
            })?;

        let written = self.sink.write_text(destination, content).await?;
        info!("Wrote prompt to {:?}", written);
        Ok(written)
    }

    /// Collect every input problem instead of stopping at the first.
    pub fn check_variables(
        &self,
        variables: &VariableMap,
        options: &GenerateOptions,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();
        for err in self
            .shape_errors(variables)
            .chain(self.value_errors(variables, options))
        {
            report.add_error(err.to_string());
        }
        if variables.is_empty() {
            report.add_warning("No variables supplied");
        }
        report
    }

    fn check_source(&self, input: &TemplateInput) -> ValidationResult<()> {
        match input {
            TemplateInput::Path(path) | TemplateInput::Inline(path) if path.is_empty() => {
                Err(ValidationError::EmptyTemplateSource)
            }
            TemplateInput::Path(path) => self.validators.paths.check_path(path).map_err(|issue| {
                ValidationError::InvalidTemplatePath {
                    path: path.clone(),
                    issue,
                }
            }),
            TemplateInput::Inline(_) => Ok(()),
        }
    }

    /// Name and path-shape problems (steps 2 and 3), in map order.
    fn shape_errors<'a>(
        &'a self,
        variables: &'a VariableMap,
    ) -> impl Iterator<Item = ValidationError> + 'a {
        let names = variables
            .keys()
            .filter(move |key| !self.validators.names.is_valid_name(key))
            .map(|key| ValidationError::InvalidVariableName(key.to_string()));

        let paths = variables
            .iter()
            .filter(|(key, _)| is_path_like_key(key))
            .filter_map(move |(key, value)| {
                let value = value.as_str()?;
                let issue = self.validators.paths.check_path(value).err()?;
                Some(ValidationError::InvalidVariablePath {
                    name: key.to_string(),
                    issue,
                })
            });

        names.chain(paths)
    }

    /// Type and markdown problems (step 4), in map order.
    fn value_errors<'a>(
        &'a self,
        variables: &'a VariableMap,
        options: &'a GenerateOptions,
    ) -> impl Iterator<Item = ValidationError> + 'a {
        let types = variables
            .iter()
            .filter(|(_, value)| !value.is_string())
            .map(|(key, value)| ValidationError::NonStringValue {
                name: key.to_string(),
                found: value_kind(value).to_string(),
            });

        let markdown = variables
            .iter()
            .filter(move |(key, _)| options.validate_markdown_inputs && options.is_raw(key))
            .filter_map(move |(key, value)| {
                let value = value.as_str()?;
                let issue = self.validators.markdown.check_markdown(value).err()?;
                Some(ValidationError::InvalidMarkdown {
                    subject: format!("variable '{}'", key),
                    issue,
                })
            });

        types.chain(markdown)
    }

    async fn check_paths_exist(&self, variables: &VariableMap) -> ValidationResult<()> {
        for (key, value) in variables.iter().filter(|(key, _)| is_path_like_key(key)) {
            let Some(path) = value.as_str() else {
                continue;
            };
            if !self.source.exists(path).await {
                return Err(ValidationError::PathNotFound {
                    name: key.to_string(),
                    value: path.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for PromptManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptManager")
            .field("validators", &self.validators)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FsError, PromptError};
    use crate::fs::{MockOutputSink, MockTemplateSource};
    use serde_json::json;
    use stencil_validate::PathIssue;
    use tempfile::tempdir;

    fn manager_with(source: MockTemplateSource, sink: MockOutputSink) -> PromptManager {
        PromptManager::new(Arc::new(source), Arc::new(sink))
    }

    /// A manager whose collaborators must never be called.
    fn offline() -> PromptManager {
        manager_with(MockTemplateSource::new(), MockOutputSink::new())
    }

    fn serving(template: &'static str) -> PromptManager {
        let mut source = MockTemplateSource::new();
        source
            .expect_read_text()
            .returning(move |_| Ok(template.to_string()));
        manager_with(source, MockOutputSink::new())
    }

    fn vars(pairs: &[(&str, &str)]) -> VariableMap {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    async fn generate(
        manager: &PromptManager,
        input: TemplateInput,
        variables: &VariableMap,
    ) -> PromptResult<GeneratedPrompt> {
        manager
            .generate_prompt(&input, variables, &GenerateOptions::default())
            .await
    }

    #[tokio::test]
    async fn test_basic_scenario() {
        let manager = serving("Hello {name}, you are {age} years old.");
        let result = generate(
            &manager,
            TemplateInput::path("greeting.md"),
            &vars(&[("name", "John"), ("age", "30")]),
        )
        .await
        .unwrap();

        assert_eq!(result.prompt, "Hello John, you are 30 years old.");
        assert!(result.unknown_variables.is_empty());
        assert!(result.output_path.is_none());
    }

    #[tokio::test]
    async fn test_missing_variable_degrades_gracefully() {
        let manager = offline();
        let result = manager
            .generate(
                &TemplateInput::inline("Hello {name}"),
                &VariableMap::new(),
                &GenerateOptions::default(),
            )
            .await;

        assert_eq!(
            result,
            SubstitutionResult::Success {
                prompt: "Hello ".to_string(),
                unknown_variables: vec!["name".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn test_template_path_traversal_is_rejected_before_reading() {
        let err = generate(&offline(), TemplateInput::path("../x.md"), &VariableMap::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("directory traversal"));
    }

    #[tokio::test]
    async fn test_empty_template_source() {
        let err = generate(&offline(), TemplateInput::path(""), &VariableMap::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PromptError::Validation(ValidationError::EmptyTemplateSource)
        ));
    }

    #[tokio::test]
    async fn test_invalid_key_rejects_whole_request() {
        let variables = vars(&[("ok", "1"), ("user-name", "x"), ("also.bad", "y")]);
        let err = generate(&offline(), TemplateInput::inline("{ok}"), &variables)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Validation error: Invalid variable name: 'user-name' (must start with a letter and contain only letters, digits, or underscores)"
        );
    }

    #[tokio::test]
    async fn test_path_like_value_traversal() {
        let variables = vars(&[("config_path", "a/b/../c")]);
        let err = generate(&offline(), TemplateInput::inline("{config_path}"), &variables)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PromptError::Validation(ValidationError::InvalidVariablePath {
                issue: PathIssue::DirectoryTraversal,
                ..
            })
        ));
        assert!(err.to_string().contains("directory traversal"));
    }

    #[tokio::test]
    async fn test_path_like_value_characters() {
        let variables = vars(&[("input_file", "my notes.md")]);
        let err = generate(&offline(), TemplateInput::inline("{input_file}"), &variables)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Contains invalid characters"));
    }

    #[tokio::test]
    async fn test_non_path_keys_are_not_path_checked() {
        let variables = vars(&[("description", "../anything goes")]);
        let result = generate(&offline(), TemplateInput::inline("{description}"), &variables)
            .await
            .unwrap();
        assert_eq!(result.prompt, "../anything goes");
    }

    #[tokio::test]
    async fn test_name_errors_come_before_type_errors() {
        let mut variables = VariableMap::new();
        variables.insert("count", json!(3));
        variables.insert("bad-key", "x");

        let err = generate(&offline(), TemplateInput::inline("{count}"), &variables)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("'bad-key'"));
    }

    #[tokio::test]
    async fn test_non_string_value_is_rejected() {
        let variables = VariableMap::new().with("count", json!(3));
        let err = generate(&offline(), TemplateInput::inline("{count}"), &variables)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Variable 'count' must be a string, got number"));
    }

    #[tokio::test]
    async fn test_missing_template_is_file_system_error() {
        let mut source = MockTemplateSource::new();
        source
            .expect_read_text()
            .returning(|path| Err(FsError::NotFound(PathBuf::from(path))));
        let manager = manager_with(source, MockOutputSink::new());

        let err = generate(&manager, TemplateInput::path("nope.md"), &VariableMap::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileSystem);
        assert_eq!(err.to_string(), "File system error: Template not found: nope.md");
    }

    #[tokio::test]
    async fn test_invalid_placeholder_in_template() {
        let err = generate(
            &serving("Hi {user-name}"),
            TemplateInput::path("t.md"),
            &VariableMap::new(),
        )
        .await
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("Invalid placeholder name in template: 'user-name'"));
    }

    #[tokio::test]
    async fn test_first_invalid_placeholder_by_position() {
        let err = generate(
            &serving("{zz-first} {aa-second}"),
            TemplateInput::path("t.md"),
            &VariableMap::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            PromptError::Validation(ValidationError::InvalidPlaceholderName(ref name))
                if name == "zz-first"
        ));
    }

    #[tokio::test]
    async fn test_blank_template_content() {
        let err = generate(&serving("  \n"), TemplateInput::path("t.md"), &VariableMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PromptError::Validation(ValidationError::EmptyTemplate)));
    }

    #[tokio::test]
    async fn test_reject_policy_lists_missing_in_order() {
        let options = GenerateOptions::new().missing(MissingPolicy::Reject);
        let err = offline()
            .generate_prompt(
                &TemplateInput::inline("{b} {a} {c} {b}"),
                &vars(&[("c", "C")]),
                &options,
            )
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required variables: b, a"
        );
    }

    #[tokio::test]
    async fn test_markdown_input_gating() {
        let options = GenerateOptions::new().validate_markdown_inputs(true);
        let variables = vars(&[("input_markdown", "#NoSpace")]);

        let err = offline()
            .generate_prompt(&TemplateInput::inline("{input_markdown}"), &variables, &options)
            .await
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("Invalid markdown in variable 'input_markdown': No markdown heading found"));
    }

    #[tokio::test]
    async fn test_raw_markdown_inserted_unescaped() {
        let body = "# Notes\n\n<kbd>Ctrl</kbd> & friends";
        let variables = vars(&[("input_markdown", body), ("title", "A & B")]);
        let result = generate(
            &offline(),
            TemplateInput::inline("{title}\n{input_markdown}"),
            &variables,
        )
        .await
        .unwrap();
        assert_eq!(result.prompt, format!("A &amp; B\n{}", body));
    }

    #[tokio::test]
    async fn test_output_markdown_validation() {
        let options = GenerateOptions::new().validate_output(true);
        let err = offline()
            .generate_prompt(
                &TemplateInput::inline("no heading {x}"),
                &vars(&[("x", "1")]),
                &options,
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid markdown in generated prompt"));
    }

    #[tokio::test]
    async fn test_structured_mode() {
        let options = GenerateOptions::new().structured(true);
        let template = "# {title}\nIntro\n## Details\n{details}\n";
        let result = offline()
            .generate_prompt(
                &TemplateInput::inline(template),
                &vars(&[("title", "Plan"), ("details", "Step one")]),
                &options,
            )
            .await
            .unwrap();

        assert_eq!(result.sections.len(), 2);
        assert_eq!(result.sections[0].title, "Plan");
        assert_eq!(result.sections[1].body, "Step one\n");
    }

    #[tokio::test]
    async fn test_structured_mode_rejects_skipped_level() {
        let options = GenerateOptions::new().structured(true);
        let err = offline()
            .generate_prompt(
                &TemplateInput::inline("# A\na\n### C\nc\n"),
                &VariableMap::new(),
                &options,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PromptError::Validation(ValidationError::HeadingLevelSkip { .. })
        ));
    }

    #[tokio::test]
    async fn test_required_paths_must_exist() {
        let mut source = MockTemplateSource::new();
        source.expect_exists().returning(|path| path == "present.md");
        let manager = manager_with(source, MockOutputSink::new());
        let options = GenerateOptions::new().require_existing_paths(true);

        let ok = manager
            .generate_prompt(
                &TemplateInput::inline("{doc_file}"),
                &vars(&[("doc_file", "present.md")]),
                &options,
            )
            .await;
        assert!(ok.is_ok());

        let err = manager
            .generate_prompt(
                &TemplateInput::inline("{doc_file}"),
                &vars(&[("doc_file", "absent.md")]),
                &options,
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("does not exist: absent.md"));
    }

    #[tokio::test]
    async fn test_output_written_after_success() {
        let mut sink = MockOutputSink::new();
        sink.expect_write_text()
            .times(1)
            .returning(|path, content| {
                assert_eq!(content, "Hi Ann");
                Ok(PathBuf::from("out").join(path))
            });
        let manager = manager_with(MockTemplateSource::new(), sink);
        let options = GenerateOptions::new().with_output("prompts/ann.md");

        let result = manager
            .generate_prompt(
                &TemplateInput::inline("Hi {name}"),
                &vars(&[("name", "Ann")]),
                &options,
            )
            .await
            .unwrap();
        assert_eq!(result.output_path, Some(PathBuf::from("out/prompts/ann.md")));
    }

    #[tokio::test]
    async fn test_output_path_is_validated() {
        let options = GenerateOptions::new().with_output("/etc/prompt.md");
        let err = offline()
            .generate_prompt(&TemplateInput::inline("x"), &VariableMap::new(), &options)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid output path '/etc/prompt.md'"));
    }

    #[tokio::test]
    async fn test_permission_denied_on_write() {
        let mut sink = MockOutputSink::new();
        sink.expect_write_text()
            .returning(|path, _| Err(FsError::PermissionDenied(PathBuf::from(path))));
        let manager = manager_with(MockTemplateSource::new(), sink);
        let options = GenerateOptions::new().with_output("locked.md");

        let result = manager
            .generate(&TemplateInput::inline("x"), &VariableMap::new(), &options)
            .await;
        match result {
            SubstitutionResult::Failure { error, kind } => {
                assert_eq!(kind, ErrorKind::FileSystem);
                assert!(error.contains("Permission denied"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_local_round_trip() {
        let temp = tempdir().unwrap();
        std::fs::create_dir_all(temp.path().join("prompts")).unwrap();
        std::fs::write(
            temp.path().join("prompts/review.md"),
            "# Review\n\nFile: {target_file}  \n",
        )
        .unwrap();

        let config = StencilConfig {
            templates_dir: temp.path().to_path_buf(),
            output_dir: temp.path().join("out"),
            ..Default::default()
        };
        let manager = PromptManager::local(&config);
        let options = GenerateOptions::new().with_output("review.md").validate_output(true);

        let result = manager
            .generate_prompt(
                &TemplateInput::path("prompts/review.md"),
                &vars(&[("target_file", "src/lib.rs")]),
                &options,
            )
            .await
            .unwrap();

        assert_eq!(result.prompt, "# Review\n\nFile: src/lib.rs  \n");
        let written = std::fs::read_to_string(temp.path().join("out/review.md")).unwrap();
        assert_eq!(written, result.prompt);
    }

    #[test]
    fn test_check_variables_collects_everything() {
        let mut variables = VariableMap::new();
        variables.insert("bad-name", "x");
        variables.insert("src_path", "../up");
        variables.insert("count", json!(1));

        let report = offline().check_variables(&variables, &GenerateOptions::default());
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 3);
    }

    #[test]
    fn test_from_result_keeps_result() {
        let ok: PromptResult<GeneratedPrompt> = Ok(GeneratedPrompt {
            prompt: "Hi".to_string(),
            unknown_variables: vec!["x".to_string()],
            sections: Vec::new(),
            output_path: None,
        });
        assert_eq!(
            SubstitutionResult::from_result(&ok),
            SubstitutionResult::Success {
                prompt: "Hi".to_string(),
                unknown_variables: vec!["x".to_string()],
            }
        );
        assert!(ok.is_ok());

        let err: PromptResult<GeneratedPrompt> =
            Err(FsError::NotFound(PathBuf::from("t.md")).into());
        let shape = SubstitutionResult::from_result(&err);
        assert_eq!(shape, SubstitutionResult::from(err));
        assert!(matches!(
            shape,
            SubstitutionResult::Failure { kind: ErrorKind::FileSystem, ref error }
                if error.starts_with("File system error:")
        ));
    }

    #[test]
    fn test_serialized_result_shape() {
        let success = SubstitutionResult::Success {
            prompt: "Hello ".to_string(),
            unknown_variables: vec!["name".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&success).unwrap(),
            json!({"success": true, "prompt": "Hello ", "unknownVariables": ["name"]})
        );

        let failure = SubstitutionResult::Failure {
            error: "Validation error: Template source is empty".to_string(),
            kind: ErrorKind::Validation,
        };
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({
                "success": false,
                "error": "Validation error: Template source is empty",
                "kind": "validation"
            })
        );
    }
}
