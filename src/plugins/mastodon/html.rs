//! Reduce status HTML to plain chat text.
//!
//! The fragment is parsed with `scraper`, so attributes and entities are
//! handled by a real HTML parser. `<br>` and the end of a `<p>` become
//! newlines; text nodes lose surrounding line breaks.

use scraper::{ElementRef, Html};

pub fn text_content(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::new();
    walk(fragment.root_element(), &mut out);
    out.trim_end_matches('\n').to_string()
}

fn walk(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text.trim_matches(['\r', '\n']));
        } else if let Some(child) = ElementRef::wrap(child) {
            match child.value().name() {
                "br" => out.push('\n'),
                "p" => {
                    walk(child, out);
                    out.push('\n');
                }
                _ => walk(child, out),
            }
        }
    }
}
