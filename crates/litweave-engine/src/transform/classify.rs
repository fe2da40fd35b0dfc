use serde::Serialize;

/// Semantic category of a single raw source line.
///
/// Assigned per line with no knowledge of the surrounding lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LineKind {
    /// Prose comment line, e.g. `// some words`.
    Text,
    /// Section header line, e.g. `// # Title`.
    Section,
    /// Empty or whitespace-only line.
    Blank,
    /// Anything else.
    Code,
}

/// A classified line: its kind plus the content renderers receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClass<'a> {
    pub kind: LineKind,
    /// For `Text` and `Section` this is the line minus the comment prefix,
    /// so section content still starts with the `#` header marker.
    pub content: &'a str,
}

/// Classifies lines of an annotated source file.
///
/// The prose prefix is the comment token followed by a space (`// `), and
/// the section prefix is the prose prefix followed by `#` (`// #`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClassifier {
    text_prefix: String,
    section_prefix: String,
}

impl LineClassifier {
    pub const DEFAULT_COMMENT: &'static str = "//";

    /// Build a classifier for the given line-comment token (`//`, `#`, `--`...).
    pub fn new(comment: &str) -> Self {
        let text_prefix = format!("{comment} ");
        let section_prefix = format!("{text_prefix}#");
        Self {
            text_prefix,
            section_prefix,
        }
    }

    /// Classifies a line into a [`LineClass`].
    ///
    /// Total over all inputs: the empty string is `Blank`, and anything not
    /// recognised as prose, header or blank is `Code`.
    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        if line.starts_with(&self.section_prefix) {
            return LineClass {
                kind: LineKind::Section,
                content: &line[self.text_prefix.len()..],
            };
        }
        if let Some(rest) = line.strip_prefix(self.text_prefix.as_str()) {
            return LineClass {
                kind: LineKind::Text,
                content: rest,
            };
        }
        let kind = if line.trim().is_empty() {
            LineKind::Blank
        } else {
            LineKind::Code
        };
        LineClass {
            kind,
            content: line,
        }
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COMMENT)
    }
}

/// Classify with the default `//` comment token.
pub fn classify(line: &str) -> LineClass<'_> {
    LineClassifier::default().classify(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("// # Title", LineKind::Section, "# Title")]
    #[case("// #", LineKind::Section, "#")]
    #[case("// ## Sub", LineKind::Section, "## Sub")]
    #[case("// some prose", LineKind::Text, "some prose")]
    #[case("// a", LineKind::Text, "a")]
    #[case("//  indented", LineKind::Text, " indented")]
    #[case("// ", LineKind::Text, "")]
    #[case("", LineKind::Blank, "")]
    #[case("   \t", LineKind::Blank, "   \t")]
    #[case("code();", LineKind::Code, "code();")]
    #[case("//", LineKind::Code, "//")]
    #[case("//no space", LineKind::Code, "//no space")]
    #[case("  // indented comment", LineKind::Code, "  // indented comment")]
    #[case("//#tight", LineKind::Code, "//#tight")]
    fn classifies_default_prefixes(
        #[case] line: &str,
        #[case] kind: LineKind,
        #[case] content: &str,
    ) {
        assert_eq!(classify(line), LineClass { kind, content });
    }

    #[test]
    fn classification_is_pure() {
        let classifier = LineClassifier::default();
        for line in ["// # H", "// t", "", "x = 1;"] {
            assert_eq!(classifier.classify(line), classifier.classify(line));
        }
    }

    #[test]
    fn custom_comment_token() {
        let classifier = LineClassifier::new("#");
        assert_eq!(classifier.classify("# # Intro").kind, LineKind::Section);
        assert_eq!(classifier.classify("# # Intro").content, "# Intro");
        assert_eq!(classifier.classify("# prose").kind, LineKind::Text);
        assert_eq!(classifier.classify("print(1)").kind, LineKind::Code);
        assert_eq!(classifier.classify("// not prose").kind, LineKind::Code);
    }

    #[test]
    fn multibyte_content_is_sliced_on_char_boundary() {
        let class = classify("// é → ü");
        assert_eq!(class.kind, LineKind::Text);
        assert_eq!(class.content, "é → ü");
    }
}
