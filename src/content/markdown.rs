use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;

use html5ever::driver::ParseOpts;
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{ns, parse_document, LocalName, QualName};
use htmd::HtmlToMarkdown;
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};

use crate::content::fence::{detect_language, render_code_block, NodeShape, ParentShape, DEFAULT_FENCE};

/// Converts post and comment HTML to Markdown.
///
/// Code blocks and styled images are handled here, on the parsed DOM, before the rest
/// of the document goes through the standard rules of `htmd`:
/// * every `<pre>` becomes a fenced block tagged with its highlight language
/// * a `<div>` or `<blockquote>` whose first element is a `<pre>` is unwrapped, the
///   wrapper markup is dropped and its `<pre>` is fenced like any other
/// * an `<img>` carrying a `style` attribute is kept as HTML
///
/// Each of them is swapped for a placeholder token that survives the standard rules and
/// is replaced by the final Markdown afterwards.
pub struct MarkdownConverter {
    fence: String,
    standard: HtmlToMarkdown,
}

/// Markdown produced outside of the standard rules, waiting to be put back in place.
/// Tokens are built from private use code points, which don't show up in post text.
#[derive(Default)]
struct Preserved {
    blocks: Vec<String>,
    inlines: Vec<String>,
}

impl Preserved {
    fn block_token(index: usize) -> String {
        format!("\u{F8F0}{}\u{F8F1}", index)
    }

    fn inline_token(index: usize) -> String {
        format!("\u{F8F2}{}\u{F8F3}", index)
    }

    fn push_block(&mut self, markdown: String) -> String {
        self.blocks.push(markdown);
        Self::block_token(self.blocks.len() - 1)
    }

    fn push_inline(&mut self, html: String) -> String {
        self.inlines.push(html);
        Self::inline_token(self.inlines.len() - 1)
    }

    fn restore(&self, markdown: &str) -> String {
        let mut lines: Vec<String> = Vec::new();
        for line in markdown.lines() {
            let mut line = line.to_string();
            for (i, block) in self.blocks.iter().enumerate() {
                let token = Self::block_token(i);
                if let Some(pos) = line.find(&token) {
                    let block = indent_block(block.trim_matches('\n'), &line[..pos]);
                    line = line.replacen(&token, &block, 1);
                }
            }
            for (i, inline) in self.inlines.iter().enumerate() {
                line = line.replace(&Self::inline_token(i), inline);
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

/// The first line of `block` follows `prefix` on the token line. The other lines get the
/// same nesting: `>` markers are repeated, list markers and indentation become spaces.
fn indent_block(block: &str, prefix: &str) -> String {
    let continuation: String = prefix.chars()
        .map(|c| if c == '>' { '>' } else { ' ' })
        .collect();

    let mut lines = block.lines();
    let mut res = lines.next().unwrap_or("").to_string();
    for line in lines {
        res.push('\n');
        if line.is_empty() {
            res.push_str(continuation.trim_end());
        } else {
            res.push_str(&continuation);
            res.push_str(line);
        }
    }
    res
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter {
    pub fn new() -> Self {
        Self::with_fence(DEFAULT_FENCE)
    }

    pub fn with_fence(fence: &str) -> Self {
        let standard = HtmlToMarkdown::builder()
            .skip_tags(vec!["script", "style"])
            .build();

        MarkdownConverter {
            fence: fence.to_string(),
            standard,
        }
    }

    pub fn convert(&self, html: &str) -> io::Result<String> {
        if html.trim().is_empty() {
            return Ok(String::new());
        }

        let dom = parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let Some(body) = find_element(&dom.document, "body") else {
            return Ok(String::new());
        };

        let mut preserved = Preserved::default();
        self.rewrite_children(&body, &mut preserved)?;

        let mut rewritten = Vec::new();
        serialize(&mut rewritten, &SerializableHandle::from(body.clone()), SerializeOpts::default())?;
        let rewritten = String::from_utf8(rewritten)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let markdown = self.standard.convert(&rewritten)?;

        Ok(preserved.restore(&markdown).trim().to_string())
    }

    fn rewrite_children(&self, node: &Handle, preserved: &mut Preserved) -> io::Result<()> {
        let children: Vec<Handle> = node.children.borrow().clone();
        let parent_shape = ParentShape {
            class: class_of(node),
            child_count: count_child_nodes(&children),
        };

        let mut rewritten: Vec<Handle> = Vec::with_capacity(children.len());
        for child in children {
            let name = element_name(&child).map(str::to_string);
            match name.as_deref() {
                Some("pre") => {
                    let markdown = self.fence_pre(&child, Some(parent_shape.clone()));
                    rewritten.push(block_placeholder(&preserved.push_block(markdown)));
                }
                Some("div") | Some("blockquote") if first_element_is_pre(&child) => {
                    // The wrapper goes away, its content takes its place
                    self.rewrite_children(&child, preserved)?;
                    rewritten.extend(child.children.take());
                }
                Some("img") if has_attribute(&child, "style") => {
                    let html = serialize_node(&child)?;
                    rewritten.push(create_text(&preserved.push_inline(html)));
                }
                Some(_) => {
                    self.rewrite_children(&child, preserved)?;
                    rewritten.push(child);
                }
                None => rewritten.push(child),
            }
        }

        for child in rewritten.iter() {
            child.parent.set(Some(Rc::downgrade(node)));
        }
        *node.children.borrow_mut() = rewritten;

        Ok(())
    }

    fn fence_pre(&self, pre: &Handle, parent: Option<ParentShape>) -> String {
        let shape = NodeShape {
            class: class_of(pre),
            parent,
        };
        let lang = detect_language(&shape);

        let mut code = String::new();
        for child in pre.children.borrow().iter() {
            text_content(child, &mut code);
        }

        render_code_block(&code, lang, &self.fence)
    }
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if element_name(handle) == Some(tag) {
        return Some(handle.clone());
    }
    handle.children.borrow().iter().find_map(|child| find_element(child, tag))
}

fn element_name(handle: &Handle) -> Option<&str> {
    match handle.data {
        NodeData::Element { ref name, .. } => Some(&*name.local),
        _ => None,
    }
}

fn attribute(handle: &Handle, attr_name: &str) -> Option<String> {
    match handle.data {
        NodeData::Element { ref attrs, .. } => attrs.borrow().iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

fn has_attribute(handle: &Handle, attr_name: &str) -> bool {
    attribute(handle, attr_name).is_some()
}

fn class_of(handle: &Handle) -> String {
    attribute(handle, "class").unwrap_or_default()
}

fn is_blank_text(handle: &Handle) -> bool {
    match handle.data {
        NodeData::Text { ref contents } => contents.borrow().trim().is_empty(),
        _ => false,
    }
}

/// Whitespace between tags is layout, not content
fn count_child_nodes(children: &[Handle]) -> usize {
    children.iter().filter(|child| !is_blank_text(child)).count()
}

fn first_element_is_pre(handle: &Handle) -> bool {
    handle.children.borrow().iter()
        .find(|child| element_name(child).is_some())
        .map(|child| element_name(child) == Some("pre"))
        .unwrap_or(false)
}

/// Text of a node and everything below it, tags ignored. `<br>` counts as a line break.
fn text_content(handle: &Handle, buf: &mut String) {
    match handle.data {
        NodeData::Text { ref contents } => buf.push_str(&contents.borrow()),
        NodeData::Element { ref name, .. } if &*name.local == "br" => buf.push('\n'),
        _ => {
            for child in handle.children.borrow().iter() {
                text_content(child, buf);
            }
        }
    }
}

fn serialize_node(handle: &Handle) -> io::Result<String> {
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    let mut output = Vec::new();
    serialize(&mut output, &SerializableHandle::from(handle.clone()), opts)?;
    String::from_utf8(output).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn block_placeholder(token: &str) -> Handle {
    let paragraph = Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: QualName::new(None, ns!(html), LocalName::from("p")),
            attrs: RefCell::new(Vec::new()),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    });
    let text = create_text(token);
    text.parent.set(Some(Rc::downgrade(&paragraph)));
    paragraph.children.borrow_mut().push(text);
    paragraph
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}
