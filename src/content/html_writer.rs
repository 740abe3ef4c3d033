use std::fmt;
use std::fmt::Write;

use crate::content::ast::{Align, Node};

/// Serializes a tree to HTML.
///
/// Raw HTML nodes are copied verbatim: content authors are trusted and the
/// output is not sanitized. Do not feed this with untrusted markdown.
pub fn to_html(root: &Node) -> Result<String, fmt::Error> {
    let mut writer = HtmlWriter { buf: String::new() };
    writer.write_node(root)?;
    Ok(writer.buf)
}

struct HtmlWriter {
    buf: String,
}

fn escape_into(buf: &mut String, value: &str, in_attribute: bool) {
    for c in value.chars() {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' if in_attribute => buf.push_str("&quot;"),
            c => buf.push(c),
        }
    }
}

impl HtmlWriter {
    fn text(&mut self, value: &str) {
        escape_into(&mut self.buf, value, false);
    }

    fn attr(&mut self, name: &str, value: &str) {
        self.buf.push(' ');
        self.buf.push_str(name);
        self.buf.push_str("=\"");
        escape_into(&mut self.buf, value, true);
        self.buf.push('"');
    }

    fn write_node(&mut self, node: &Node) -> fmt::Result {
        match node {
            Node::Root(children) => {
                self.write_blocks(children)?;
                if !children.is_empty() {
                    self.buf.push('\n');
                }
            }
            Node::Paragraph(children) => self.write_element("p", children)?,
            Node::Heading { depth, children } => {
                write!(self.buf, "<h{}>", depth)?;
                self.write_inlines(children)?;
                write!(self.buf, "</h{}>", depth)?;
            }
            Node::ThematicBreak => self.buf.push_str("<hr>"),
            Node::Blockquote(children) => {
                self.buf.push_str("<blockquote>\n");
                if !children.is_empty() {
                    self.write_blocks(children)?;
                    self.buf.push('\n');
                }
                self.buf.push_str("</blockquote>");
            }
            Node::List { ordered, start, spread, children } => {
                let tag = if *ordered { "ol" } else { "ul" };
                write!(self.buf, "<{}", tag)?;
                if let Some(start) = start.filter(|s| *ordered && *s != 1) {
                    write!(self.buf, " start=\"{}\"", start)?;
                }
                self.buf.push_str(">\n");

                let loose = *spread || children.iter().any(|c| matches!(c, Node::ListItem { spread: true, .. }));
                for child in children {
                    self.write_list_item(child, loose)?;
                    self.buf.push('\n');
                }
                write!(self.buf, "</{}>", tag)?;
            }
            Node::ListItem { spread, .. } => self.write_list_item(node, *spread)?,
            Node::Code { lang, value } => {
                self.buf.push_str("<pre><code");
                if let Some(lang) = lang {
                    self.attr("class", &format!("language-{}", lang));
                }
                self.buf.push('>');
                self.text(value);
                if !value.is_empty() {
                    self.buf.push('\n');
                }
                self.buf.push_str("</code></pre>");
            }
            Node::Html(value) => self.buf.push_str(value),
            Node::Table { align, children } => self.write_table(align, children)?,
            Node::TableRow(_) => self.write_row(node, "td", &[])?,
            Node::TableCell(children) => self.write_element("td", children)?,
            Node::Text(value) => self.text(value),
            Node::Emphasis(children) => self.write_element("em", children)?,
            Node::Strong(children) => self.write_element("strong", children)?,
            Node::Delete(children) => self.write_element("del", children)?,
            Node::InlineCode(value) => {
                self.buf.push_str("<code>");
                self.text(value);
                self.buf.push_str("</code>");
            }
            Node::Break => self.buf.push_str("<br>\n"),
            Node::Link { url, title, children } => {
                self.buf.push_str("<a");
                self.attr("href", url);
                if let Some(title) = title {
                    self.attr("title", title);
                }
                self.buf.push('>');
                self.write_inlines(children)?;
                self.buf.push_str("</a>");
            }
            Node::Image { url, title, alt } => {
                self.buf.push_str("<img");
                self.attr("src", url);
                self.attr("alt", alt);
                if let Some(title) = title {
                    self.attr("title", title);
                }
                self.buf.push('>');
            }
            Node::Mark { hint, children } => {
                write!(self.buf, "<{}", hint.tag_name)?;
                self.attr("class", &hint.class_name);
                self.buf.push('>');
                self.write_inlines(children)?;
                write!(self.buf, "</{}>", hint.tag_name)?;
            }
        }

        Ok(())
    }

    fn write_element(&mut self, tag: &str, children: &[Node]) -> fmt::Result {
        write!(self.buf, "<{}>", tag)?;
        self.write_inlines(children)?;
        write!(self.buf, "</{}>", tag)
    }

    fn write_inlines(&mut self, children: &[Node]) -> fmt::Result {
        for child in children {
            self.write_node(child)?;
        }
        Ok(())
    }

    fn write_blocks(&mut self, children: &[Node]) -> fmt::Result {
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                self.buf.push('\n');
            }
            self.write_node(child)?;
        }
        Ok(())
    }

    // Tight items render their paragraphs without the <p> wrapper
    fn write_list_item(&mut self, node: &Node, loose: bool) -> fmt::Result {
        let (checked, children) = match node {
            Node::ListItem { checked, children, .. } => (*checked, children),
            other => return self.write_node(other),
        };

        let checkbox = checked.map(|c| {
            if c {
                "<input type=\"checkbox\" checked disabled> "
            } else {
                "<input type=\"checkbox\" disabled> "
            }
        });

        match checkbox {
            Some(_) => self.buf.push_str("<li class=\"task-list-item\">"),
            None => self.buf.push_str("<li>"),
        }

        if children.is_empty() {
            if let Some(checkbox) = checkbox {
                self.buf.push_str(checkbox.trim_end());
            }
            self.buf.push_str("</li>");
            return Ok(());
        }

        for (i, child) in children.iter().enumerate() {
            let tight_paragraph = !loose && matches!(child, Node::Paragraph(_));
            if i > 0 || !tight_paragraph {
                self.buf.push('\n');
            }

            match child {
                Node::Paragraph(inlines) => {
                    if !tight_paragraph {
                        self.buf.push_str("<p>");
                    }
                    if let (0, Some(checkbox)) = (i, checkbox) {
                        self.buf.push_str(checkbox);
                    }
                    self.write_inlines(inlines)?;
                    if !tight_paragraph {
                        self.buf.push_str("</p>");
                    }
                }
                other => {
                    if let (0, Some(checkbox)) = (i, checkbox) {
                        self.buf.push_str(checkbox);
                    }
                    self.write_node(other)?;
                }
            }
        }

        let ends_tight = !loose && matches!(children.last(), Some(Node::Paragraph(_)));
        if !ends_tight {
            self.buf.push('\n');
        }
        self.buf.push_str("</li>");
        Ok(())
    }

    fn write_table(&mut self, align: &[Align], rows: &[Node]) -> fmt::Result {
        self.buf.push_str("<table>\n");
        let mut rows = rows.iter();

        if let Some(head) = rows.next() {
            self.buf.push_str("<thead>\n");
            self.write_row(head, "th", align)?;
            self.buf.push_str("\n</thead>\n");
        }

        let body: Vec<&Node> = rows.collect();
        if !body.is_empty() {
            self.buf.push_str("<tbody>\n");
            for row in body {
                self.write_row(row, "td", align)?;
                self.buf.push('\n');
            }
            self.buf.push_str("</tbody>\n");
        }

        self.buf.push_str("</table>");
        Ok(())
    }

    fn write_row(&mut self, row: &Node, cell_tag: &str, align: &[Align]) -> fmt::Result {
        let cells = match row {
            Node::TableRow(cells) => cells,
            other => return self.write_node(other),
        };

        self.buf.push_str("<tr>\n");
        for (i, cell) in cells.iter().enumerate() {
            write!(self.buf, "<{}", cell_tag)?;
            if let Some(align) = align.get(i).and_then(Align::as_attr) {
                self.attr("align", align);
            }
            self.buf.push('>');
            if let Some(children) = cell.children() {
                self.write_inlines(children)?;
            }
            write!(self.buf, "</{}>\n", cell_tag)?;
        }
        self.buf.push_str("</tr>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Node {
        Node::Text(value.to_string())
    }

    #[test]
    fn test_escapes_text_and_attributes() {
        let tree = Node::Root(vec![Node::Paragraph(vec![
            text("a < b & c"),
            Node::Link {
                url: "https://example.com/?a=1&b=\"2\"".to_string(),
                title: None,
                children: vec![text("link")],
            },
        ])]);
        assert_eq!(to_html(&tree).unwrap(),
                   "<p>a &lt; b &amp; c<a href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\">link</a></p>\n");
    }

    #[test]
    fn test_raw_html_is_not_sanitized() {
        let tree = Node::Root(vec![Node::Html("<div class=\"note\"><script>x()</script></div>".to_string())]);
        assert_eq!(to_html(&tree).unwrap(), "<div class=\"note\"><script>x()</script></div>\n");
    }

    #[test]
    fn test_mark_uses_hint() {
        let tree = Node::Paragraph(vec![Node::mark("hi")]);
        assert_eq!(to_html(&tree).unwrap(), "<p><mark class=\"m-mark\">hi</mark></p>");
    }

    #[test]
    fn test_tight_and_loose_items() {
        let tight = Node::List {
            ordered: false,
            start: None,
            spread: false,
            children: vec![
                Node::ListItem { spread: false, checked: None, children: vec![Node::Paragraph(vec![text("a")])] },
                Node::ListItem { spread: false, checked: Some(true), children: vec![Node::Paragraph(vec![text("b")])] },
            ],
        };
        assert_eq!(to_html(&tight).unwrap(),
                   "<ul>\n<li>a</li>\n<li class=\"task-list-item\"><input type=\"checkbox\" checked disabled> b</li>\n</ul>");

        let loose = Node::List {
            ordered: true,
            start: Some(3),
            spread: true,
            children: vec![
                Node::ListItem { spread: false, checked: None, children: vec![Node::Paragraph(vec![text("a")])] },
            ],
        };
        assert_eq!(to_html(&loose).unwrap(), "<ol start=\"3\">\n<li>\n<p>a</p>\n</li>\n</ol>");
    }

    #[test]
    fn test_code_block() {
        let tree = Node::Code { lang: Some("rust".to_string()), value: "let a = 1 < 2;".to_string() };
        assert_eq!(to_html(&tree).unwrap(), "<pre><code class=\"language-rust\">let a = 1 &lt; 2;\n</code></pre>");
    }

    #[test]
    fn test_table() {
        let tree = Node::Table {
            align: vec![Align::Left, Align::None],
            children: vec![
                Node::TableRow(vec![Node::TableCell(vec![text("a")]), Node::TableCell(vec![text("b")])]),
                Node::TableRow(vec![Node::TableCell(vec![text("1")]), Node::TableCell(vec![text("2")])]),
            ],
        };
        assert_eq!(to_html(&tree).unwrap(), "<table>\n<thead>\n<tr>\n<th align=\"left\">a</th>\n<th>b</th>\n</tr>\n</thead>\n\
<tbody>\n<tr>\n<td align=\"left\">1</td>\n<td>2</td>\n</tr>\n</tbody>\n</table>");
    }
}
