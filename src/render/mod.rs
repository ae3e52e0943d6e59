pub mod html;

pub use html::HtmlConverter;

use crate::domain::FeedItem;
use crate::errors::GoreadResult;

/// Format used for the "Published:" line. No timezone conversion is applied.
pub const PUBLISHED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[cfg_attr(test, mockall::automock)]
pub trait MarkupConverter {
    /// Markup to readable text that keeps headings and emphasis as markdown.
    fn to_markdown(&self, html: &str) -> GoreadResult<String>;

    /// Markup to its visible text with every tag stripped.
    fn to_text(&self, html: &str) -> GoreadResult<String>;
}

pub struct Renderer<C: MarkupConverter = HtmlConverter> {
    converter: C,
}

impl Default for Renderer<HtmlConverter> {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<HtmlConverter> {
    pub fn new() -> Self {
        Self {
            converter: HtmlConverter::new(),
        }
    }
}

impl<C: MarkupConverter> Renderer<C> {
    pub fn with_converter(converter: C) -> Self {
        Self { converter }
    }

    /// Render an item as a single markdown document:
    /// heading, first author, publish date, converted body.
    ///
    /// Nothing is returned if the body fails to convert.
    pub fn markdownize(&self, item: &FeedItem) -> GoreadResult<String> {
        let mut mdown = format!("# {}\n ", item.title);

        // Only the first author is shown
        if let Some(author) = item.authors.first() {
            mdown.push_str(&author.name);
            mdown.push('\n');
        }

        if let Some(published) = &item.published {
            mdown.push('\n');
            mdown.push_str("Published: ");
            mdown.push_str(&published.format(PUBLISHED_FORMAT).to_string());
        }

        mdown.push_str("\n\n");
        mdown.push_str(&self.converter.to_markdown(&item.description)?);

        Ok(mdown)
    }

    pub fn plain_text(&self, html: &str) -> GoreadResult<String> {
        self.converter.to_text(html)
    }
}

/// Visible text of a markup document, e.g. for previews.
pub fn html_to_text(content: &str) -> GoreadResult<String> {
    HtmlConverter::new().to_text(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Person;
    use crate::errors::GoreadError;
    use chrono::DateTime;

    fn item() -> FeedItem {
        FeedItem::new("T".to_string()).with_description("<p>hi</p>".to_string())
    }

    #[test]
    fn test_markdownize_minimal_item() {
        let rendered = Renderer::new().markdownize(&item()).unwrap();
        assert_eq!(rendered, "# T\n \n\nhi");
    }

    #[test]
    fn test_markdownize_first_author_only() {
        let item = item().with_authors(vec![Person::new("Alice"), Person::new("Bob")]);

        let rendered = Renderer::new().markdownize(&item).unwrap();

        assert_eq!(rendered, "# T\n Alice\n\n\nhi");
        assert!(!rendered.contains("Bob"));
    }

    #[test]
    fn test_markdownize_full_item_order() {
        let published = DateTime::parse_from_rfc3339("2024-03-05T14:07:09+02:00").unwrap();
        let item = item()
            .with_authors(vec![Person::new("Alice")])
            .with_published(Some(published));

        let rendered = Renderer::new().markdownize(&item).unwrap();

        assert_eq!(
            rendered,
            "# T\n Alice\n\nPublished: 2024-03-05 14:07:09\n\nhi"
        );
    }

    #[test]
    fn test_markdownize_keeps_timestamp_offset() {
        let published = DateTime::parse_from_rfc3339("2024-03-05T23:30:00-05:00").unwrap();
        let item = item().with_published(Some(published));

        let rendered = Renderer::new().markdownize(&item).unwrap();

        assert_eq!(rendered, "# T\n \nPublished: 2024-03-05 23:30:00\n\nhi");
    }

    #[test]
    fn test_markdownize_passes_description_to_converter() {
        let mut converter = MockMarkupConverter::new();
        converter
            .expect_to_markdown()
            .times(1)
            .returning(|html| Ok(format!("converted {}", html)));

        let rendered = Renderer::with_converter(converter).markdownize(&item()).unwrap();
        assert_eq!(rendered, "# T\n \n\nconverted <p>hi</p>");
    }

    #[test]
    fn test_markdownize_conversion_failure_propagates() {
        let mut converter = MockMarkupConverter::new();
        converter
            .expect_to_markdown()
            .returning(|_| Err(GoreadError::Conversion("broken markup".to_string())));

        let err = Renderer::with_converter(converter)
            .markdownize(&item())
            .unwrap_err();

        assert!(matches!(err, GoreadError::Conversion(ref msg) if msg == "broken markup"));
    }

    #[test]
    fn test_plain_text_failure_propagates() {
        let mut converter = MockMarkupConverter::new();
        converter
            .expect_to_text()
            .returning(|_| Err(GoreadError::Conversion("bad".to_string())));

        assert!(Renderer::with_converter(converter).plain_text("<p>").is_err());
    }

    #[test]
    fn test_html_to_text() {
        assert_eq!(
            html_to_text("<p>Hello <em>there</em>, world</p>").unwrap(),
            "Hello there, world"
        );
    }
}
