//! Heading-delimited section analysis for structured output.

use serde::Serialize;
use stencil_validate::{is_fence, parse_heading, ValidationError, ValidationResult};

/// A run of lines headed by a markdown heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub level: usize,
    pub title: String,
    /// Lines after the heading up to the next heading, terminators kept.
    pub body: String,
}

impl Section {
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Splits text into sections and checks heading structure.
///
/// Text before the first heading is preamble and belongs to no section.
/// Headings inside fenced code blocks do not start sections.
pub struct SectionAnalyzer;

impl SectionAnalyzer {
    /// Split text into sections in source order without validating them.
    pub fn split(text: &str) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();
        let mut in_fence = false;

        for line in text.split_inclusive('\n') {
            if is_fence(line) {
                in_fence = !in_fence;
            } else if !in_fence {
                let bare = line.trim_end_matches(['\r', '\n']);
                if let Some(heading) = parse_heading(bare) {
                    sections.push(Section {
                        level: heading.level,
                        title: heading.title,
                        body: String::new(),
                    });
                    continue;
                }
            }

            if let Some(current) = sections.last_mut() {
                current.body.push_str(line);
            }
        }

        sections
    }

    /// Split and validate.
    ///
    /// Fails when a heading is more than one level deeper than the heading
    /// before it, or when any section has a blank body.
    pub fn analyze(text: &str) -> ValidationResult<Vec<Section>> {
        let sections = Self::split(text);

        for (i, section) in sections.iter().enumerate() {
            if i > 0 {
                let previous = sections[i - 1].level;
                if section.level > previous + 1 {
                    return Err(ValidationError::HeadingLevelSkip {
                        title: section.title.clone(),
                        previous,
                        found: section.level,
                    });
                }
            }

            if section.is_empty() {
                return Err(ValidationError::EmptySection(section.title.clone()));
            }
        }

        Ok(sections)
    }
}
