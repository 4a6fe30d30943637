// src/readme/language.rs
// =============================================================================
// The primary language as a closed set.
//
// GitHub reports languages as free-form strings ("TypeScript", "Rust", ...).
// We lower-case once and map onto Language; anything we have no template for
// becomes Language::Other, so every lookup below is a total match.
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Java,
    Go,
    Rust,
    Other,
}

/// A fenced usage example: the fence's language tag and its body lines.
pub struct UsageSnippet {
    pub tag: &'static str,
    pub lines: &'static [&'static str],
}

const JAVASCRIPT_USAGE: UsageSnippet = UsageSnippet {
    tag: "javascript",
    lines: &[
        "import { ProjectName } from \"./src/index.js\";",
        "",
        "const project = new ProjectName();",
        "project.initialize();",
    ],
};

const PYTHON_USAGE: UsageSnippet = UsageSnippet {
    tag: "python",
    lines: &[
        "from project_name import ProjectName",
        "",
        "project = ProjectName()",
        "project.run()",
    ],
};

const JAVA_USAGE: UsageSnippet = UsageSnippet {
    tag: "java",
    lines: &[
        "public class Main {",
        "    public static void main(String[] args) {",
        "        ProjectName project = new ProjectName();",
        "        project.start();",
        "    }",
        "}",
    ],
};

const GO_USAGE: UsageSnippet = UsageSnippet {
    tag: "go",
    lines: &[
        "package main",
        "",
        "import \"fmt\"",
        "",
        "func main() {",
        "    fmt.Println(\"Hello from project!\")",
        "}",
    ],
};

const RUST_USAGE: UsageSnippet = UsageSnippet {
    tag: "rust",
    lines: &[
        "use project_name::ProjectName;",
        "",
        "fn main() {",
        "    let project = ProjectName::new();",
        "    project.run();",
        "}",
    ],
};

impl Language {
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_lowercase()).as_deref() {
            Some("javascript") => Language::JavaScript,
            Some("typescript") => Language::TypeScript,
            Some("python") => Language::Python,
            Some("java") => Language::Java,
            Some("go") => Language::Go,
            Some("rust") => Language::Rust,
            _ => Language::Other,
        }
    }

    /// The language-flavoured line for the Features list.
    pub fn feature(self) -> Option<&'static str> {
        match self {
            Language::JavaScript | Language::TypeScript => {
                Some("🌐 **Modern JavaScript/TypeScript** - Leveraging latest ES features")
            }
            Language::Python => Some("🐍 **Python Powered** - Clean and readable Python code"),
            Language::Java => Some("☕ **Java Excellence** - Robust and scalable Java architecture"),
            Language::Go => Some("🚀 **Go Performance** - Lightning-fast and concurrent"),
            Language::Rust => Some("🦀 **Rust Safety** - Memory-safe and blazingly fast"),
            Language::Other => None,
        }
    }

    pub fn usage(self) -> Option<&'static UsageSnippet> {
        match self {
            Language::JavaScript | Language::TypeScript => Some(&JAVASCRIPT_USAGE),
            Language::Python => Some(&PYTHON_USAGE),
            Language::Java => Some(&JAVA_USAGE),
            Language::Go => Some(&GO_USAGE),
            Language::Rust => Some(&RUST_USAGE),
            Language::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(Language::from_name(Some("TypeScript")), Language::TypeScript);
        assert_eq!(Language::from_name(Some("RUST")), Language::Rust);
        assert_eq!(Language::from_name(Some("Go")), Language::Go);
    }

    #[test]
    fn test_unmapped_languages_are_other() {
        assert_eq!(Language::from_name(Some("Haskell")), Language::Other);
        assert_eq!(Language::from_name(None), Language::Other);
        assert!(Language::Other.feature().is_none());
        assert!(Language::Other.usage().is_none());
    }

    #[test]
    fn test_typescript_shares_javascript_snippet() {
        let snippet = Language::TypeScript.usage().unwrap();
        assert_eq!(snippet.tag, "javascript");
    }
}
