use std::path::Path;

/// Language whose structural boundaries drive separator selection
///
/// Each variant maps to a prioritized separator table: declaration keywords
/// first, then blank lines, single newlines, spaces, and finally the empty
/// string (hard character cut). The tables are data consumed by the chunker,
/// not branching inside the algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Go,
    Java,
    C,
    Cpp,
    CSharp,
    Ruby,
    Swift,
    Kotlin,
    Markdown,
    Html,
    Unknown,
}

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "rs" => Language::Rust,
            "py" | "pyw" => Language::Python,
            "js" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "go" => Language::Go,
            "java" => Language::Java,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Language::Cpp,
            "cs" => Language::CSharp,
            "rb" => Language::Ruby,
            "swift" => Language::Swift,
            "kt" | "kts" => Language::Kotlin,
            "md" | "markdown" => Language::Markdown,
            "html" | "htm" => Language::Html,
            _ => Language::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Get language name as string
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Go => "go",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Ruby => "ruby",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Markdown => "markdown",
            Language::Html => "html",
            Language::Unknown => "unknown",
        }
    }

    /// Get the prioritized separator table for this language
    ///
    /// Entries are regex patterns, most structurally meaningful first. Every
    /// table ends with the empty string so the recursion always has a hard
    /// character cut to fall back on. `Unknown` maps to the plain-text
    /// defaults.
    pub fn separators(self) -> Vec<&'static str> {
        match self {
            Language::Rust => vec![
                "\nfn ", "\nconst ", "\nlet ", "\nif ", "\nwhile ", "\nfor ", "\nloop ",
                "\nmatch ", "\n\n", "\n", " ", "",
            ],
            Language::Python => vec![
                "\nclass ", "\ndef ", "\n\tdef ", "\n\n", "\n", " ", "",
            ],
            Language::JavaScript => vec![
                "\nfunction ", "\nconst ", "\nlet ", "\nvar ", "\nclass ", "\nif ", "\nfor ",
                "\nwhile ", "\nswitch ", "\ncase ", "\ndefault ", "\n\n", "\n", " ", "",
            ],
            Language::TypeScript => vec![
                "\nenum ", "\ninterface ", "\nnamespace ", "\ntype ", "\nclass ",
                "\nfunction ", "\nconst ", "\nlet ", "\nvar ", "\nif ", "\nfor ", "\nwhile ",
                "\nswitch ", "\ncase ", "\ndefault ", "\n\n", "\n", " ", "",
            ],
            Language::Go => vec![
                "\nfunc ", "\nvar ", "\nconst ", "\ntype ", "\nif ", "\nfor ", "\nswitch ",
                "\ncase ", "\n\n", "\n", " ", "",
            ],
            Language::Java => vec![
                "\nclass ", "\npublic ", "\nprotected ", "\nprivate ", "\nstatic ", "\nif ",
                "\nfor ", "\nwhile ", "\nswitch ", "\ncase ", "\n\n", "\n", " ", "",
            ],
            Language::C | Language::Cpp => vec![
                "\nclass ", "\nvoid ", "\nint ", "\nfloat ", "\ndouble ", "\nif ", "\nfor ",
                "\nwhile ", "\nswitch ", "\ncase ", "\n\n", "\n", " ", "",
            ],
            Language::CSharp => vec![
                "\ninterface ", "\nenum ", "\nimplements ", "\ndelegate ", "\nevent ",
                "\nclass ", "\nabstract ", "\npublic ", "\nprotected ", "\nprivate ",
                "\nstatic ", "\nreturn ", "\nif ", "\ncontinue ", "\nfor ", "\nforeach ",
                "\nwhile ", "\nswitch ", "\nbreak ", "\ncase ", "\nelse ", "\ntry ",
                "\nthrow ", "\nfinally ", "\ncatch ", "\n\n", "\n", " ", "",
            ],
            Language::Ruby => vec![
                "\ndef ", "\nclass ", "\nif ", "\nunless ", "\nwhile ", "\nfor ", "\ndo ",
                "\nbegin ", "\nrescue ", "\n\n", "\n", " ", "",
            ],
            Language::Swift => vec![
                "\nfunc ", "\nclass ", "\nstruct ", "\nenum ", "\nif ", "\nfor ", "\nwhile ",
                "\ndo ", "\nswitch ", "\ncase ", "\n\n", "\n", " ", "",
            ],
            Language::Kotlin => vec![
                "\nclass ", "\nfun ", "\nval ", "\nvar ", "\nif ", "\nfor ", "\nwhile ",
                "\nwhen ", "\ncase ", "\nelse ", "\n\n", "\n", " ", "",
            ],
            Language::Markdown => vec![
                "\n#{1,6} ", "```\n", "\n\\*\\*\\*+\n", "\n---+\n", "\n___+\n", "\n\n", "\n",
                " ", "",
            ],
            Language::Html => vec![
                "<body", "<div", "<p", "<br", "<li", "<h1", "<h2", "<h3", "<h4", "<h5",
                "<h6", "<span", "<table", "<tr", "<td", "<th", "<ul", "<ol", "<header",
                "<footer", "<nav", "<head", "<style", "<script", "<meta", "<title", "",
            ],
            Language::Unknown => vec!["\n\n", "\n", " ", ""],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("rs"), Language::Rust);
        assert_eq!(Language::from_extension("RS"), Language::Rust);
        assert_eq!(Language::from_extension("py"), Language::Python);
        assert_eq!(Language::from_extension("md"), Language::Markdown);
        assert_eq!(Language::from_extension("html"), Language::Html);
        assert_eq!(Language::from_extension("unknown"), Language::Unknown);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Language::from_path("test.rs"), Language::Rust);
        assert_eq!(Language::from_path("src/main.py"), Language::Python);
        assert_eq!(Language::from_path("docs/README.md"), Language::Markdown);
        assert_eq!(Language::from_path("no_extension"), Language::Unknown);
    }

    #[test]
    fn test_every_table_ends_with_hard_cut() {
        let languages = [
            Language::Rust,
            Language::Python,
            Language::JavaScript,
            Language::TypeScript,
            Language::Go,
            Language::Java,
            Language::C,
            Language::Cpp,
            Language::CSharp,
            Language::Ruby,
            Language::Swift,
            Language::Kotlin,
            Language::Markdown,
            Language::Html,
            Language::Unknown,
        ];

        for language in languages {
            let separators = language.separators();
            assert_eq!(
                separators.last(),
                Some(&""),
                "{} table must end with the empty separator",
                language.as_str()
            );
        }
    }

    #[test]
    fn test_tables_are_valid_regex() {
        for language in [Language::Markdown, Language::Python, Language::Rust] {
            for separator in language.separators() {
                if !separator.is_empty() {
                    assert!(
                        regex::Regex::new(separator).is_ok(),
                        "separator `{separator}` must compile"
                    );
                }
            }
        }
    }

    #[test]
    fn test_code_tables_put_declarations_first() {
        assert_eq!(Language::Python.separators()[0], "\nclass ");
        assert_eq!(Language::Rust.separators()[0], "\nfn ");
        assert_eq!(Language::Go.separators()[0], "\nfunc ");
    }
}
