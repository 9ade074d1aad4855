//! List rendering.
//!
//! Renders `<ul>`/`<ol>` nodes, nested to any depth, into indented line
//! records. Numbering of an ordered list always starts at 1 for that list
//! node, independent of its parent and of sibling lists.

use crate::inline::split_nodes;
use crate::types::{LineKind, LineRecord, Run, RunStyle};
use scraper::ElementRef;

/// Bullet prefix for unordered list items.
pub const BULLET_PREFIX: &str = "• ";

/// Paragraph spacing after a list item, in points.
pub const LIST_ITEM_SPACE_AFTER_PT: f32 = 0.0;

/// Transient state while rendering one list node.
#[derive(Debug, Clone, Copy)]
struct ListContext {
    ordered: bool,
    level: usize,
    ordinal: usize,
}

impl ListContext {
    fn prefix(&self) -> String {
        if self.ordered {
            format!("{}. ", self.ordinal)
        } else {
            BULLET_PREFIX.to_string()
        }
    }
}

/// Check whether an element is a list container.
pub fn is_list(element: ElementRef<'_>) -> bool {
    matches!(element.value().name(), "ul" | "ol")
}

/// Render a list node and its descendants at nesting `level`.
///
/// Only direct `<li>` children count as items of this list. Each item
/// yields one line holding its own inline content; lists nested in the
/// item follow immediately at `level + 1`.
pub fn render_list(list: ElementRef<'_>, level: usize) -> Vec<LineRecord> {
    let mut ctx = ListContext {
        ordered: list.value().name() == "ol",
        level,
        ordinal: 0,
    };
    let mut lines = Vec::new();

    for item in list.children().filter_map(ElementRef::wrap) {
        if item.value().name() != "li" {
            log::debug!("Skipping <{}> directly inside a list", item.value().name());
            continue;
        }
        ctx.ordinal += 1;

        let mut inline = Vec::new();
        let mut nested = Vec::new();
        for child in item.children() {
            match ElementRef::wrap(child) {
                Some(element) if is_list(element) => nested.push(element),
                Some(element) => {
                    inline.push(child);
                    collect_nested_lists(element, &mut nested);
                }
                None => inline.push(child),
            }
        }

        let mut runs = vec![Run::plain(ctx.prefix())];
        runs.extend(split_nodes(inline, &RunStyle::default()));
        lines.push(LineRecord::new(
            LineKind::ListItem,
            ctx.level,
            runs,
            LIST_ITEM_SPACE_AFTER_PT,
        ));

        for sublist in nested {
            lines.extend(render_list(sublist, ctx.level + 1));
        }
    }

    lines
}

/// Collect the outermost lists below `element`, in document order.
///
/// Lists wrapped in other elements inside an item (`<li><div><ul>`) still
/// belong to that item.
fn collect_nested_lists<'a>(element: ElementRef<'a>, lists: &mut Vec<ElementRef<'a>>) {
    for child in element.children().filter_map(ElementRef::wrap) {
        if is_list(child) {
            lists.push(child);
        } else {
            collect_nested_lists(child, lists);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn render_first_list(html: &str) -> Vec<(usize, String)> {
        let fragment = Html::parse_fragment(html);
        let selector = Selector::parse("ul, ol").unwrap();
        let list = fragment.select(&selector).next().unwrap();
        render_list(list, 0)
            .iter()
            .map(|l| (l.level, l.text()))
            .collect()
    }

    #[test]
    fn test_unordered_list() {
        let lines = render_first_list("<ul><li>One</li><li>Two</li></ul>");
        assert_eq!(
            lines,
            vec![(0, "• One".to_string()), (0, "• Two".to_string())]
        );
    }

    #[test]
    fn test_ordered_list_nested_in_unordered_item() {
        let lines = render_first_list("<ul><li>Top<ol><li>Sub1</li><li>Sub2</li></ol></li></ul>");
        assert_eq!(
            lines,
            vec![
                (0, "• Top".to_string()),
                (1, "1. Sub1".to_string()),
                (1, "2. Sub2".to_string()),
            ]
        );
    }

    #[test]
    fn test_nested_lines_come_before_next_sibling() {
        let lines = render_first_list(
            "<ol><li>A<ul><li>a1</li></ul></li><li>B<ol><li>b1</li><li>b2<ol><li>deep</li></ol></li></ol></li></ol>",
        );
        assert_eq!(
            lines,
            vec![
                (0, "1. A".to_string()),
                (1, "• a1".to_string()),
                (0, "2. B".to_string()),
                (1, "1. b1".to_string()),
                (1, "2. b2".to_string()),
                (2, "1. deep".to_string()),
            ]
        );
    }

    #[test]
    fn test_nested_items_not_counted_at_parent_level() {
        let lines = render_first_list("<ol><li>x<ol><li>y</li><li>z</li></ol></li><li>w</li></ol>");
        assert_eq!(lines[3], (0, "2. w".to_string()));
    }

    #[test]
    fn test_item_runs_keep_styles() {
        let fragment = Html::parse_fragment("<ul><li>See <a href='https://e.x'>docs</a></li></ul>");
        let selector = Selector::parse("ul").unwrap();
        let lines = render_list(fragment.select(&selector).next().unwrap(), 0);

        assert_eq!(lines.len(), 1);
        let runs = &lines[0].runs;
        assert_eq!(runs[0].text, BULLET_PREFIX);
        assert_eq!(runs[1].text, "See");
        assert_eq!(runs[2].hyperlink.as_deref(), Some("https://e.x"));
        assert_eq!(lines[0].kind, LineKind::ListItem);
    }

    #[test]
    fn test_list_wrapped_in_item_element() {
        let lines = render_first_list("<ul><li>x<div><ul><li>y</li></ul></div></li></ul>");
        assert_eq!(
            lines,
            vec![(0, "• x".to_string()), (1, "• y".to_string())]
        );

        let lines = render_first_list(
            "<ol><li><span>a</span><div><p>note</p><ol><li>b</li></ol></div><ul><li>c</li></ul></li><li>d</li></ol>",
        );
        assert_eq!(
            lines,
            vec![
                (0, "1. anote".to_string()),
                (1, "1. b".to_string()),
                (1, "• c".to_string()),
                (0, "2. d".to_string()),
            ]
        );
    }

    #[test]
    fn test_paragraph_inside_item() {
        let lines = render_first_list("<ul><li><p>wrapped</p></li></ul>");
        assert_eq!(lines, vec![(0, "• wrapped".to_string())]);
    }
}
