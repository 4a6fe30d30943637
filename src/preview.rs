// src/preview.rs
// =============================================================================
// Renders a generated README to a standalone HTML page for previewing in a
// browser. Uses pulldown-cmark with the GitHub-ish extensions turned on; this
// is a convenience view, not a faithful GitHub renderer.
// =============================================================================

use std::io;

use pulldown_cmark::escape::escape_html;
use pulldown_cmark::{html, Options, Parser};

// Renders a README as the body of a complete HTML page
//
// Parameters:
//   title: shown in the browser tab (HTML-escaped)
//   markdown: the README text (borrowed as &str)
//
// Returns: the page, or the escaper's write error (a String sink never raises one)
pub fn render_html(title: &str, markdown: &str) -> io::Result<String> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    // Markdown events straight into an HTML string
    let parser = Parser::new_ext(markdown, options);
    let mut body = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut body, parser);

    let mut escaped_title = String::with_capacity(title.len());
    escape_html(&mut escaped_title, title)?;

    Ok(format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{} - README preview</title>\n\
         <style>body {{ max-width: 860px; margin: 2rem auto; font-family: sans-serif; line-height: 1.6; }} \
         pre {{ background: #f6f8fa; padding: 1rem; overflow-x: auto; }}</style>\n\
         </head>\n\
         <body>\n{}</body>\n\
         </html>\n",
        escaped_title, body
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_headings_and_code() {
        let html = render_html("demo", "# demo\n\n## Usage\n\n```rust\nfn main() {}\n```\n").unwrap();
        assert!(html.contains("<h1>demo</h1>"));
        assert!(html.contains("<h2>Usage</h2>"));
        assert!(html.contains("<code class=\"language-rust\">"));
        assert!(html.contains("<title>demo - README preview</title>"));
    }

    #[test]
    fn test_render_badges_as_images() {
        let html = render_html("x", "![stars](https://img.shields.io/github/stars/a/b)").unwrap();
        assert!(html.contains("<img src=\"https://img.shields.io/github/stars/a/b\" alt=\"stars\""));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = render_html("<script>", "text").unwrap();
        assert!(html.contains("<title>&lt;script&gt; - README preview</title>"));

        let html = render_html("R&D \"tools\"", "text").unwrap();
        assert!(html.contains("<title>R&amp;D &quot;tools&quot; - README preview</title>"));
    }
}
