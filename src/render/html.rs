use scraper::{ElementRef, Html, Node};

use super::MarkupConverter;
use crate::errors::GoreadResult;

/// Elements whose content is never shown.
const HIDDEN: &[&str] = &["script", "style", "head", "title", "noscript", "template"];

/// HTML converter built on `scraper`'s html5ever tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlConverter;

#[derive(Clone, Copy, Default)]
struct Context {
    preformatted: bool,
}

impl HtmlConverter {
    pub fn new() -> Self {
        Self
    }

    fn children(&self, element: ElementRef<'_>, out: &mut String, ctx: Context) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => push_text(out, text, ctx),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.element(child, out, ctx);
                    }
                }
                _ => {}
            }
        }
    }

    fn render_children(&self, element: ElementRef<'_>, ctx: Context) -> String {
        let mut buf = String::new();
        self.children(element, &mut buf, ctx);
        buf
    }

    fn element(&self, element: ElementRef<'_>, out: &mut String, ctx: Context) {
        let name = element.value().name();
        if HIDDEN.contains(&name) {
            return;
        }

        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse::<usize>().unwrap_or(1);
                let inner = self.render_children(element, ctx);
                let inner = inner.split_whitespace().collect::<Vec<_>>().join(" ");
                if !inner.is_empty() {
                    push_block(out, &format!("{} {}", "#".repeat(level), inner));
                }
            }
            "p" | "div" | "section" | "article" | "header" | "footer" | "main" | "aside"
            | "figure" | "figcaption" | "table" | "tr" | "dl" | "dt" | "dd" => {
                let inner = self.render_children(element, ctx);
                push_block(out, inner.trim());
            }
            "br" => out.push('\n'),
            "hr" => push_block(out, "* * *"),
            "strong" | "b" => {
                push_wrapped(out, element, &self.render_children(element, ctx), "**", "**")
            }
            "em" | "i" => {
                push_wrapped(out, element, &self.render_children(element, ctx), "_", "_")
            }
            "code" if !ctx.preformatted => {
                push_wrapped(out, element, &self.render_children(element, ctx), "`", "`")
            }
            "pre" => {
                let inner = self.render_children(element, Context { preformatted: true });
                let inner = inner.trim_matches('\n');
                if !inner.is_empty() {
                    push_block(out, &format!("```\n{}\n```", inner));
                }
            }
            "a" => {
                let inner = self.render_children(element, ctx);
                match element.value().attr("href").filter(|href| !href.is_empty()) {
                    Some(href) => {
                        push_wrapped(out, element, &inner, "[", &format!("]({})", href))
                    }
                    None => push_wrapped(out, element, &inner, "", ""),
                }
            }
            "img" => {
                if let Some(src) = element.value().attr("src") {
                    let alt = element.value().attr("alt").unwrap_or_default();
                    out.push_str(&format!("![{}]({})", alt, src));
                }
            }
            "blockquote" => {
                let inner = tidy(&self.render_children(element, ctx));
                let quoted = inner
                    .lines()
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {}", line)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                push_block(out, &quoted);
            }
            "ul" | "ol" => {
                let list = self.list(element, name == "ol", ctx);
                push_block(out, &list);
            }
            _ => self.children(element, out, ctx),
        }
    }

    fn list(&self, element: ElementRef<'_>, ordered: bool, ctx: Context) -> String {
        let mut lines = Vec::new();
        let items = element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "li");

        for (index, item) in items.enumerate() {
            let marker = if ordered {
                format!("{}. ", index + 1)
            } else {
                "- ".to_string()
            };
            let indent = " ".repeat(marker.len());
            let body = tidy(&self.render_children(item, ctx));

            for (n, line) in body.lines().enumerate() {
                if n == 0 {
                    lines.push(format!("{}{}", marker, line));
                } else if line.is_empty() {
                    lines.push(String::new());
                } else {
                    lines.push(format!("{}{}", indent, line));
                }
            }
        }

        lines.join("\n")
    }

    fn text(&self, element: ElementRef<'_>, out: &mut String) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) if matches!(el.name(), "script" | "style") => {}
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.text(child, out);
                    }
                }
                _ => {}
            }
        }
    }
}

impl MarkupConverter for HtmlConverter {
    fn to_markdown(&self, html: &str) -> GoreadResult<String> {
        let fragment = Html::parse_fragment(html);
        let mut out = String::new();
        self.children(fragment.root_element(), &mut out, Context::default());

        Ok(tidy(&out).trim_start().to_string())
    }

    fn to_text(&self, html: &str) -> GoreadResult<String> {
        let document = Html::parse_document(html);
        let mut out = String::new();
        self.text(document.root_element(), &mut out);
        Ok(out)
    }
}

fn push_text(out: &mut String, text: &str, ctx: Context) {
    if ctx.preformatted {
        out.push_str(text);
        return;
    }

    let mut collapsed = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_whitespace() {
            if !collapsed.ends_with(' ') {
                collapsed.push(' ');
            }
        } else {
            collapsed.push(c);
        }
    }

    if out.is_empty() || out.ends_with('\n') || out.ends_with(' ') {
        out.push_str(collapsed.trim_start());
    } else {
        out.push_str(&collapsed);
    }
}

fn push_block(out: &mut String, content: &str) {
    if content.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push_str("\n\n");
    }
    out.push_str(content);
    out.push_str("\n\n");
}

/// Wrap trimmed inline content in delimiters. Whitespace at the element's
/// edges stays outside so neighbouring words do not run together.
fn push_wrapped(
    out: &mut String,
    element: ElementRef<'_>,
    inner: &str,
    open: &str,
    close: &str,
) {
    let leading = element
        .text()
        .find(|t| !t.is_empty())
        .is_some_and(|t| t.starts_with(char::is_whitespace));
    let trailing = element
        .text()
        .filter(|t| !t.is_empty())
        .last()
        .is_some_and(|t| t.ends_with(char::is_whitespace));

    if leading {
        push_space(out);
    }

    let inner = inner.trim();
    if inner.is_empty() {
        return;
    }

    out.push_str(open);
    out.push_str(inner);
    out.push_str(close);

    if trailing {
        push_space(out);
    }
}

fn push_space(out: &mut String) {
    if !(out.is_empty() || out.ends_with('\n') || out.ends_with(' ')) {
        out.push(' ');
    }
}

/// Trailing spaces dropped, runs of blank lines squeezed to one, ends trimmed.
fn tidy(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim_end) {
        if line.is_empty() && lines.last().map_or(true, |last| last.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    lines.join("\n").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markdown(html: &str) -> String {
        HtmlConverter::new().to_markdown(html).unwrap()
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(markdown("<p>hi</p>"), "hi");
    }

    #[test]
    fn test_heading_and_emphasis() {
        let html = "<h1>Title</h1><p>Some <strong>bold</strong> and <em>italic</em> text.</p>";
        assert_eq!(markdown(html), "# Title\n\nSome **bold** and _italic_ text.");
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(markdown("<h3>Deep</h3>"), "### Deep");
        assert_eq!(markdown("<h6>Deepest</h6>"), "###### Deepest");
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        assert_eq!(markdown("<p>one</p>\n\n\n<p>two</p>"), "one\n\ntwo");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(markdown("<p>  lots   of\n\tspace  </p>"), "lots of space");
    }

    #[test]
    fn test_line_break() {
        assert_eq!(markdown("<p>line<br>break</p>"), "line\nbreak");
    }

    #[test]
    fn test_links_and_images() {
        assert_eq!(
            markdown(r#"<p>See <a href="https://example.com">this</a>.</p>"#),
            "See [this](https://example.com)."
        );
        assert_eq!(
            markdown(r#"<img src="https://example.com/a.png" alt="chart">"#),
            "![chart](https://example.com/a.png)"
        );
        assert_eq!(markdown(r#"<a href="">bare</a>"#), "bare");
    }

    #[test]
    fn test_inline_edge_whitespace_kept_outside_delimiters() {
        assert_eq!(
            markdown("<p>word <b>bold </b>next and<em> it</em></p>"),
            "word **bold** next and _it_"
        );
        assert_eq!(
            markdown(r#"<p>go<a href="https://example.com"> here </a>now</p>"#),
            "go [here](https://example.com) now"
        );
        assert_eq!(markdown("<p>a<b> </b>b</p>"), "a b");
    }

    #[test]
    fn test_blank_lines_squeezed() {
        assert_eq!(
            markdown("<p>one  </p><div><p></p></div><hr><p>two</p>"),
            "one\n\n* * *\n\ntwo"
        );
        assert_eq!(markdown("<p>one  <br>two</p>"), "one\ntwo");
    }

    #[test]
    fn test_lists() {
        assert_eq!(markdown("<ul><li>One</li><li>Two</li></ul>"), "- One\n- Two");
        assert_eq!(markdown("<ol><li>A</li><li>B</li></ol>"), "1. A\n2. B");
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(markdown("<blockquote><p>quoted</p></blockquote>"), "> quoted");
    }

    #[test]
    fn test_code() {
        assert_eq!(markdown("<p>Run <code>cargo doc</code></p>"), "Run `cargo doc`");
        assert_eq!(
            markdown("<pre><code>fn main() {\n    run();\n}\n</code></pre>"),
            "```\nfn main() {\n    run();\n}\n```"
        );
    }

    #[test]
    fn test_hidden_elements_dropped() {
        assert_eq!(markdown("<p>a</p><script>alert(1)</script><style>p{}</style>"), "a");
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(markdown("<p>Fish &amp; Chips</p>"), "Fish & Chips");
    }

    #[test]
    fn test_plain_text_input() {
        assert_eq!(markdown("just text"), "just text");
        assert_eq!(markdown(""), "");
    }

    #[test]
    fn test_to_text_strips_markup() {
        let converter = HtmlConverter::new();
        let text = converter
            .to_text("<h1>Head</h1><p>Some <b>bold</b> text</p>")
            .unwrap();
        assert_eq!(text, "HeadSome bold text");
    }

    #[test]
    fn test_to_text_keeps_whitespace_and_skips_scripts() {
        let converter = HtmlConverter::new();
        let text = converter
            .to_text("<p>a  b</p><script>var x = 1;</script>\n<p>c</p>")
            .unwrap();
        assert_eq!(text, "a  b\nc");
    }
}
