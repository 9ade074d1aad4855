//! Inline run splitting.
//!
//! Turns the inline children of one HTML element (text mixed with
//! `<strong>`/`<b>`, `<u>` and `<a>` spans) into an ordered sequence of
//! styled runs. Emphasis nested inside an emphasized span is flattened
//! into the span's own text.

use crate::types::{Run, RunStyle};
use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::ElementRef;

/// Split all inline children of `element` into runs.
pub fn split_runs(element: ElementRef<'_>) -> Vec<Run> {
    split_nodes(element.children(), &RunStyle::default())
}

/// Split a sequence of sibling nodes into runs, starting from `style`.
pub fn split_nodes<'a>(
    nodes: impl IntoIterator<Item = NodeRef<'a, Node>>,
    style: &RunStyle,
) -> Vec<Run> {
    let mut runs = Vec::new();
    for node in nodes {
        push_node_runs(node, style, &mut runs);
    }
    runs
}

fn push_node_runs(node: NodeRef<'_, Node>, style: &RunStyle, runs: &mut Vec<Run>) {
    match node.value() {
        Node::Text(text) => runs.extend(Run::styled(text, style)),
        Node::Element(_) => {
            let Some(element) = ElementRef::wrap(node) else {
                return;
            };

            match element.value().name() {
                "strong" | "b" => runs.extend(Run::styled(&flatten_text(element), &style.bolded())),
                "u" => runs.extend(Run::styled(&flatten_text(element), &style.underlined())),
                "a" => {
                    let href = element.value().attr("href");
                    runs.extend(Run::styled(&flatten_text(element), &style.linked(href)));
                }
                // Nested lists are rendered as their own lines, never inline.
                "ul" | "ol" | "br" | "img" | "script" | "style" => {}
                other => {
                    log::trace!("Descending into inline <{}>", other);
                    for child in element.children() {
                        push_node_runs(child, style, runs);
                    }
                }
            }
        }
        _ => {}
    }
}

/// Concatenate every descendant text node of `element`, each trimmed.
pub fn flatten_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn runs_of_first(html: &str, selector: &str) -> Vec<Run> {
        let fragment = Html::parse_fragment(html);
        let selector = Selector::parse(selector).unwrap();
        let element = fragment.select(&selector).next().unwrap();
        split_runs(element)
    }

    #[test]
    fn test_anchor_between_plain_text() {
        let runs = runs_of_first("<p>before <a href='u'>link</a> after</p>", "p");

        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0], Run::plain("before"));
        assert_eq!(runs[1].text, "link");
        assert!(runs[1].underline);
        assert!(!runs[1].bold);
        assert_eq!(runs[1].hyperlink.as_deref(), Some("u"));
        assert_eq!(runs[2], Run::plain("after"));
    }

    #[test]
    fn test_empty_anchor_yields_no_run() {
        let runs = runs_of_first("<p>text <a href='u'></a></p>", "p");
        assert_eq!(runs, vec![Run::plain("text")]);
    }

    #[test]
    fn test_anchor_without_href_still_emitted() {
        let runs = runs_of_first("<p><a>label</a></p>", "p");
        assert_eq!(runs.len(), 1);
        assert!(runs[0].underline);
        assert_eq!(runs[0].hyperlink, None);

        let runs = runs_of_first("<p><a href=''>label</a></p>", "p");
        assert_eq!(runs[0].hyperlink, None);
    }

    #[test]
    fn test_bold_and_underline() {
        let runs = runs_of_first("<p><strong>Key</strong> and <b>also</b> <u>this</u></p>", "p");
        let texts: Vec<_> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["Key", "and", "also", "this"]);
        assert!(runs[0].bold);
        assert!(!runs[1].bold);
        assert!(runs[2].bold);
        assert!(runs[3].underline && !runs[3].bold);
    }

    #[test]
    fn test_nested_emphasis_inside_anchor_is_flattened() {
        let runs = runs_of_first("<p><a href='x'>go <b>now</b></a></p>", "p");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "gonow");
        assert!(!runs[0].bold);
        assert!(runs[0].underline);
    }

    #[test]
    fn test_whitespace_children_produce_no_runs() {
        let runs = runs_of_first("<p>   <strong>  </strong>\n</p>", "p");
        assert!(runs.is_empty());
    }

    #[test]
    fn test_unknown_inline_elements_keep_their_text() {
        let runs = runs_of_first("<p><em>soft</em> <span><b>hard</b></span><br>end</p>", "p");
        let texts: Vec<_> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["soft", "hard", "end"]);
        assert!(runs[1].bold);
    }

    #[test]
    fn test_entities_are_decoded() {
        let runs = runs_of_first("<p>R&amp;D &lt;3</p>", "p");
        assert_eq!(runs, vec![Run::plain("R&D <3")]);
    }
}
