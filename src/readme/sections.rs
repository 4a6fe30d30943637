// src/readme/sections.rs
// =============================================================================
// One function per README section.
//
// Every function takes the same Context and returns a text fragment with no
// leading or trailing blank lines. mod.rs joins them with a blank line in the
// order declared in SECTIONS, so the document layout lives in one place.
// =============================================================================

use super::ecosystem::{Ecosystem, EcosystemSignal};
use super::language::Language;
use crate::github::RepositoryDescriptor;

// Everything a section may look at, computed once per document.
// The listing itself is not here: sections only see what EcosystemSignal
// extracted from it.
pub struct Context<'a> {
    pub repo: &'a RepositoryDescriptor,
    pub signal: &'a EcosystemSignal,
    pub language: Language,
}

// A section renderer. Plain fn pointers so SECTIONS can be a const table.
pub type Section = fn(&Context<'_>) -> String;

/// The document skeleton, top to bottom.
pub const SECTIONS: &[Section] = &[
    title,
    badges,
    description,
    features,
    getting_started,
    usage,
    built_with,
    project_stats,
    contributing,
    license,
    author,
    acknowledgments,
    closing,
];

const DESCRIPTION_FALLBACK: &str =
    "A modern and efficient project built with cutting-edge technologies.";

pub const UNLICENSED: &str =
    "This project is currently unlicensed. Consider adding a license to protect your work.";

// Listed for every repository, before the conditional ones.
const BASE_FEATURES: [&str; 4] = [
    "🎯 **Clean and Modern Design** - Built with best practices in mind",
    "⚡ **High Performance** - Optimized for speed and efficiency",
    "🔧 **Easy to Use** - Simple setup and intuitive interface",
    "📱 **Responsive** - Works seamlessly across all devices",
];

// Step 1 of every installation recipe. The trailing "" leaves a blank line
// before step 2.
const CLONE_STEP: [&str; 6] = [
    "1. Clone the repository:",
    "   ```bash",
    "   git clone <repository-url>",
    "   cd <repository-name>",
    "   ```",
    "",
];

fn title(ctx: &Context<'_>) -> String {
    format!("# {}", ctx.repo.name)
}

// Builds the shields.io badge line
//
// Parameters:
//   ctx: the repository being documented
//
// Returns: badge images separated by single spaces, in a fixed order
//
// Stars, forks and issues always appear. Language and license only when the
// repository has them. Last commit always closes the line.
fn badges(ctx: &Context<'_>) -> String {
    let slug = format!("{}/{}", ctx.repo.owner.login, ctx.repo.name);
    let mut badges = vec![
        format!("![GitHub stars](https://img.shields.io/github/stars/{slug}?style=flat-square)"),
        format!("![GitHub forks](https://img.shields.io/github/forks/{slug}?style=flat-square)"),
        format!("![GitHub issues](https://img.shields.io/github/issues/{slug}?style=flat-square)"),
    ];
    if ctx.repo.primary_language().is_some() {
        badges.push(format!(
            "![GitHub language](https://img.shields.io/github/languages/top/{slug}?style=flat-square)"
        ));
    }
    if ctx.repo.license.is_some() {
        badges.push(format!(
            "![License](https://img.shields.io/github/license/{slug}?style=flat-square)"
        ));
    }
    badges.push(format!(
        "![GitHub last commit](https://img.shields.io/github/last-commit/{slug}?style=flat-square)"
    ));
    badges.join(" ")
}

// Falls back to a stock sentence when the description is missing or blank.
fn description(ctx: &Context<'_>) -> String {
    ctx.repo
        .description()
        .unwrap_or(DESCRIPTION_FALLBACK)
        .to_string()
}

// Builds the "Features" section
//
// Returns: the four base features, then (in this order) the language
// feature, "Well Tested" and "Docker Ready" when they apply
fn features(ctx: &Context<'_>) -> String {
    let mut items: Vec<&str> = BASE_FEATURES.to_vec();
    // Languages outside the known table add nothing
    if let Some(feature) = ctx.language.feature() {
        items.push(feature);
    }
    if ctx.signal.has_tests {
        items.push("🧪 **Well Tested** - Comprehensive test coverage");
    }
    if ctx.signal.has_docker {
        items.push("🐳 **Docker Ready** - Containerized for easy deployment");
    }
    format!("## ✨ Features\n\n{}", bullets(&items))
}

fn getting_started(ctx: &Context<'_>) -> String {
    format!(
        "## 🚀 Getting Started\n\n\
         ### Prerequisites\n\n\
         Make sure you have the following installed on your system:\n\
         {}\n\n\
         ### Installation\n\n\
         {}",
        prerequisites(ctx),
        installation(ctx)
    )
}

// Lists what to install before building
//
// Parameters:
//   ctx: uses the highest-priority ecosystem from the listing
//
// Returns: bullet lines for that ecosystem, or a single generic bullet
// naming the primary language when no manifest was found
fn prerequisites(ctx: &Context<'_>) -> String {
    let lines: Vec<String> = match ctx.signal.primary() {
        Some(Ecosystem::Node) => vec![
            "- [Node.js](https://nodejs.org/) (v14 or higher)".into(),
            "- [npm](https://www.npmjs.com/) or [yarn](https://yarnpkg.com/)".into(),
        ],
        Some(Ecosystem::Python) => vec![
            "- [Python](https://python.org/) (v3.7 or higher)".into(),
            "- [pip](https://pip.pypa.io/en/stable/)".into(),
        ],
        Some(Ecosystem::Ruby) => vec![
            "- [Ruby](https://ruby-lang.org/) (v2.7 or higher)".into(),
            "- [Bundler](https://bundler.io/)".into(),
        ],
        Some(Ecosystem::Rust) => vec![
            "- [Rust](https://rustup.rs/) (latest stable)".into(),
            "- [Cargo](https://doc.rust-lang.org/cargo/)".into(),
        ],
        Some(Ecosystem::Go) => vec!["- [Go](https://golang.org/) (v1.16 or higher)".into()],
        None => vec![format!(
            "- [{}](https://example.com) - Check project documentation for specific version requirements",
            ctx.repo.primary_language().unwrap_or("Required runtime")
        )],
    };
    lines.join("\n")
}

// Numbered installation steps: the clone step, then the ecosystem's recipe
//
// Only one ecosystem contributes, even when several manifests are present
// (Node > Python > Ruby > Rust > Go).
fn installation(ctx: &Context<'_>) -> String {
    let steps: &[&str] = match ctx.signal.primary() {
        Some(Ecosystem::Node) => &[
            "2. Install dependencies:",
            "   ```bash",
            "   npm install",
            "   # or",
            "   yarn install",
            "   ```",
            "",
            "3. Start the application:",
            "   ```bash",
            "   npm start",
            "   # or",
            "   yarn start",
            "   ```",
        ],
        Some(Ecosystem::Python) => &[
            "2. Create a virtual environment:",
            "   ```bash",
            "   python -m venv venv",
            "   source venv/bin/activate  # On Windows: venv\\Scripts\\activate",
            "   ```",
            "",
            "3. Install dependencies:",
            "   ```bash",
            "   pip install -r requirements.txt",
            "   ```",
            "",
            "4. Run the application:",
            "   ```bash",
            "   python main.py",
            "   ```",
        ],
        Some(Ecosystem::Ruby) => &[
            "2. Install dependencies:",
            "   ```bash",
            "   bundle install",
            "   ```",
            "",
            "3. Run the application:",
            "   ```bash",
            "   bundle exec ruby main.rb",
            "   ```",
        ],
        Some(Ecosystem::Rust) => &[
            "2. Build and run:",
            "   ```bash",
            "   cargo run",
            "   ```",
            "",
            "   Or build for release:",
            "   ```bash",
            "   cargo build --release",
            "   ```",
        ],
        Some(Ecosystem::Go) => &[
            "2. Install dependencies:",
            "   ```bash",
            "   go mod tidy",
            "   ```",
            "",
            "3. Run the application:",
            "   ```bash",
            "   go run main.go",
            "   ```",
        ],
        // No manifest: generic advice instead of commands
        None => &[
            "2. Follow the setup instructions specific to this project",
            "3. Refer to the project documentation for detailed installation steps",
        ],
    };
    CLONE_STEP.iter().chain(steps).copied().collect::<Vec<_>>().join("\n")
}

// Code sample for the primary language, or a pointer to the docs
fn usage(ctx: &Context<'_>) -> String {
    let body = match ctx.language.usage() {
        Some(snippet) => format!("```{}\n{}\n```", snippet.tag, snippet.lines.join("\n")),
        None => "Please refer to the project documentation for specific usage instructions.\n\
                 Each feature comes with detailed examples and API documentation."
            .to_string(),
    };
    format!("## 📖 Usage\n\nHere are some basic usage examples:\n\n{}", body)
}

// Primary language bullet first, then whatever tech_stack found
fn built_with(ctx: &Context<'_>) -> String {
    format!(
        "## 🛠️ Built With\n\n- **{}** - Primary programming language\n{}",
        ctx.repo.primary_language().unwrap_or("Multiple Languages"),
        tech_stack(ctx.signal)
    )
}

// Maps file extensions and manifests to tech-stack bullets
//
// Parameters:
//   signal: the detected extensions and manifests
//
// Returns: one bullet per technology, each at most once, in a fixed order;
// a generic bullet when nothing matched
fn tech_stack(signal: &EcosystemSignal) -> String {
    let mut stack = Vec::new();
    // Several extensions can map to one bullet (ts/tsx, js/jsx)
    if signal.has_extension("ts") || signal.has_extension("tsx") {
        stack.push("- **TypeScript** - Type-safe JavaScript");
    }
    if signal.has_extension("js") || signal.has_extension("jsx") {
        stack.push("- **JavaScript** - Dynamic programming language");
    }
    if signal.has_extension("py") {
        stack.push("- **Python** - High-level programming language");
    }
    if signal.has_extension("java") {
        stack.push("- **Java** - Object-oriented programming language");
    }
    if signal.has_extension("go") {
        stack.push("- **Go** - Fast and efficient language");
    }
    if signal.has_extension("rs") {
        stack.push("- **Rust** - Systems programming language");
    }
    // Manifest and Dockerfile are checked by name, not extension
    if signal.has_package_manifest {
        stack.push("- **Node.js** - JavaScript runtime environment");
    }
    if signal.has_dockerfile {
        stack.push("- **Docker** - Containerization platform");
    }

    if stack.is_empty() {
        "- Modern development tools and practices".to_string()
    } else {
        stack.join("\n")
    }
}

// Counts straight from the descriptor; no abbreviation here (unlike the summary card)
fn project_stats(ctx: &Context<'_>) -> String {
    let license = ctx
        .repo
        .license
        .as_ref()
        .map(|l| l.name.as_str())
        .unwrap_or("No License");
    format!(
        "## 📊 Project Stats\n\n\
         - ⭐ **{}** stars\n\
         - 🍴 **{}** forks\n\
         - 👁️ **{}** watchers\n\
         - 📝 **{}** license",
        ctx.repo.star_count, ctx.repo.fork_count, ctx.repo.watcher_count, license
    )
}

// Fixed text, same for every repository
fn contributing(_: &Context<'_>) -> String {
    [
        "## 🤝 Contributing",
        "",
        "Contributions are what make the open source community such an amazing place to learn, inspire, and create. Any contributions you make are **greatly appreciated**.",
        "",
        "1. Fork the Project",
        "2. Create your Feature Branch (`git checkout -b feature/AmazingFeature`)",
        "3. Commit your Changes (`git commit -m 'Add some AmazingFeature'`)",
        "4. Push to the Branch (`git push origin feature/AmazingFeature`)",
        "5. Open a Pull Request",
    ]
    .join("\n")
}

fn license(ctx: &Context<'_>) -> String {
    let body = match &ctx.repo.license {
        Some(license) => format!(
            "This project is licensed under the {} License - see the [LICENSE](LICENSE) file for details.",
            license.name
        ),
        None => UNLICENSED.to_string(),
    };
    format!("## 📄 License\n\n{}", body)
}

// The owner's login doubles as the display name
fn author(ctx: &Context<'_>) -> String {
    let login = &ctx.repo.owner.login;
    format!(
        "## 👤 Author\n\n\
         **{login}**\n\n\
         - GitHub: [@{login}](https://github.com/{login})\n\
         - Repository: [{}]({})",
        ctx.repo.name, ctx.repo.canonical_url
    )
}

fn acknowledgments(_: &Context<'_>) -> String {
    [
        "## 🙏 Acknowledgments",
        "",
        "- Thanks to all contributors who have helped shape this project",
        "- Inspired by the open source community",
        "- Built with ❤️ and modern development practices",
    ]
    .join("\n")
}

// Horizontal rule plus the social star badge linking to the stargazers page
fn closing(ctx: &Context<'_>) -> String {
    format!(
        "---\n\n\
         ⭐ Don't forget to give the project a star if you found it helpful!\n\n\
         [![GitHub stars](https://img.shields.io/github/stars/{}/{}.svg?style=social&label=Star)]({}/stargazers)",
        ctx.repo.owner.login, ctx.repo.name, ctx.repo.canonical_url
    )
}

// Prefixes each item with "- " and puts one per line
fn bullets(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
