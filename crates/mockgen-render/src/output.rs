//! Output assembly
//!
//! Delivered mocks arrive in no particular order. [`MockOutput`] collects
//! them and [`MockOutput::assemble`] restores source order by offset before
//! laying out the final artifact.

use crate::config::{GeneratorConfig, OutputLayout};
use crate::dispatcher::RenderDispatcher;
use crate::error::DispatchError;
use crate::report::RenderReport;
use mockgen_model::ResolvedEntity;

/// Accumulator for delivered mocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockOutput {
    entries: Vec<(i64, String)>,
}

impl MockOutput {
    /// Create empty output
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one delivered mock
    pub fn push(&mut self, text: String, offset: i64) {
        self.entries.push((offset, text));
    }

    /// Number of recorded mocks
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mock texts sorted by offset
    ///
    /// Equal offsets are ordered by text so that the result does not depend
    /// on delivery order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&str> {
        let mut entries: Vec<&(i64, String)> = self.entries.iter().collect();
        entries.sort();
        entries.into_iter().map(|(_, text)| text.as_str()).collect()
    }

    /// Lay out the final artifact
    ///
    /// Sections, separated by blank lines: header, `use` declarations,
    /// mocks in offset order. With a `cfg` gate, imports and mocks are
    /// wrapped in a gated module. Always ends with a newline.
    #[must_use]
    pub fn assemble(&self, layout: &OutputLayout) -> String {
        let mut body: Vec<String> = Vec::new();
        if !layout.imports.is_empty() {
            let imports: Vec<String> = layout
                .imports
                .iter()
                .map(|path| format!("use {};", path.trim().trim_end_matches(';')))
                .collect();
            body.push(imports.join("\n"));
        }
        body.extend(self.sorted().into_iter().map(str::to_string));
        let body = body.join("\n\n");

        let mut sections: Vec<String> = Vec::new();
        if let Some(header) = &layout.header {
            sections.push(header.trim_end().to_string());
        }
        match &layout.cfg_gate {
            Some(gate) => sections.push(format!(
                "#[cfg({gate})]\nmod {} {{\n{}\n}}",
                layout.module_name,
                indent(&body)
            )),
            None if !body.is_empty() => sections.push(body),
            None => {}
        }

        let mut out = sections.join("\n\n");
        out.push('\n');
        out
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("    {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assembled artifact plus the batch report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMocks {
    /// Final source text
    pub source: String,
    /// Number of mocks in `source`
    pub mock_count: usize,
    /// Dispatch summary
    pub report: RenderReport,
}

/// Render entities and assemble them into one artifact
#[derive(Debug)]
pub struct MockGenerator {
    dispatcher: RenderDispatcher,
    layout: OutputLayout,
}

impl MockGenerator {
    /// Create generator from configuration
    ///
    /// # Errors
    /// - `DispatchError::InvalidConfig` if either section fails validation
    /// - `DispatchError::ThreadPool` if the dedicated pool cannot be built
    pub fn new(config: GeneratorConfig) -> Result<Self, DispatchError> {
        config.layout.validate()?;
        Ok(Self {
            dispatcher: RenderDispatcher::new(config.dispatch)?,
            layout: config.layout,
        })
    }

    /// Create generator from an existing dispatcher
    #[inline]
    #[must_use]
    pub fn with_dispatcher(dispatcher: RenderDispatcher, layout: OutputLayout) -> Self {
        Self { dispatcher, layout }
    }

    /// Render all entities and assemble the result
    pub fn generate<E: ResolvedEntity>(&self, entities: &[E]) -> GeneratedMocks {
        let mut output = MockOutput::new();
        let report = self
            .dispatcher
            .dispatch(entities, |text, offset| output.push(text, offset));

        tracing::debug!("Assembling {} mocks", output.len());

        GeneratedMocks {
            source: output.assemble(&self.layout),
            mock_count: output.len(),
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn output() -> MockOutput {
        let mut output = MockOutput::new();
        output.push("struct B;".to_string(), 20);
        output.push("struct A;".to_string(), 5);
        output.push("struct C;".to_string(), 20);
        output
    }

    #[test]
    fn sorted_by_offset_then_text() {
        assert_eq!(output().sorted(), vec!["struct A;", "struct B;", "struct C;"]);
    }

    #[test]
    fn assemble_plain() {
        let layout = OutputLayout::new()
            .with_header("// @generated")
            .with_import("std::sync::Arc;");

        let expected = "\
// @generated

use std::sync::Arc;

struct A;

struct B;

struct C;
";
        assert_eq!(output().assemble(&layout), expected);
    }

    #[test]
    fn assemble_gated() {
        let layout = OutputLayout::new()
            .with_import("super::*")
            .with_cfg_gate("test")
            .with_module_name("clock_mocks");

        let mut output = MockOutput::new();
        output.push("struct A {\n    x: u8,\n}".to_string(), 1);

        let expected = "\
#[cfg(test)]
mod clock_mocks {
    use super::*;

    struct A {
        x: u8,
    }
}
";
        assert_eq!(output.assemble(&layout), expected);
    }

    #[test]
    fn assemble_empty() {
        assert_eq!(MockOutput::new().assemble(&OutputLayout::new()), "\n");
        assert!(MockOutput::new().is_empty());
    }
}
