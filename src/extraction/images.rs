//! Image index of a page

use crate::document::Document;
use crate::export::LabeledTable;
use crate::fetch::UrlResolver;

/// Column name of the image table
pub const IMAGE_COLUMN: &str = "image";

/// Every image source on the page; `/`-relative sources are made absolute
pub fn image_urls(doc: &Document, resolver: &UrlResolver) -> Vec<String> {
    doc.image_sources()
        .into_iter()
        .filter(|src| !src.is_empty())
        .map(|src| {
            if src.starts_with('/') {
                resolver.resolve(&src).unwrap_or(src)
            } else {
                src
            }
        })
        .collect()
}

/// One-column table of image URLs
pub fn image_table(doc: &Document, resolver: &UrlResolver, number: usize) -> LabeledTable {
    LabeledTable::new(
        number,
        "images",
        vec![IMAGE_COLUMN.to_string()],
        image_urls(doc, resolver)
            .into_iter()
            .map(|url| vec![url])
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_urls() {
        let html = r#"<img src="/images/a.png"><img src="//cdn.example/b.png"><img src="https://c.example/c.png"><img src="">"#;
        let doc = Document::parse("https://wiki.walkscape.app/wiki/Activities", html);
        let resolver = UrlResolver::new("https://wiki.walkscape.app").unwrap();

        assert_eq!(
            image_urls(&doc, &resolver),
            vec![
                "https://wiki.walkscape.app/images/a.png".to_string(),
                "https://cdn.example/b.png".to_string(),
                "https://c.example/c.png".to_string(),
            ]
        );

        let table = image_table(&doc, &resolver, 1);
        assert_eq!(table.columns, vec!["image"]);
        assert_eq!(table.rows.len(), 3);
    }
}
