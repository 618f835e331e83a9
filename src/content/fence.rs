use lazy_static::lazy_static;
use regex::Regex;

pub const DEFAULT_FENCE: &str = "```";

/// The parts of a `<pre>` element that decide its code block language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeShape {
    pub class: String,
    pub parent: Option<ParentShape>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentShape {
    pub class: String,
    /// Child nodes, whitespace-only text left out
    pub child_count: usize,
}

fn highlight_language(class: &str) -> Option<&str> {
    lazy_static! {
        static ref HIGHLIGHT_REGEX: Regex = Regex::new(r"highlight-(?:text|source)-([a-z0-9]+)").unwrap();
    }

    HIGHLIGHT_REGEX.captures(class)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// Language of a `<pre>` from `highlight-source-<lang>` / `highlight-text-<lang>` classes.
///
/// The class is looked up on the node itself, then on its parent. The parent is only
/// trusted when the `<pre>` is its single child, a container holding more content
/// is a layout wrapper and its classes say nothing about the code.
/// Returns an empty string when there is no language.
pub fn detect_language(node: &NodeShape) -> &str {
    if let Some(lang) = highlight_language(&node.class) {
        return lang;
    }

    match node.parent {
        Some(ref parent) if parent.child_count == 1 => highlight_language(&parent.class).unwrap_or(""),
        _ => "",
    }
}

pub fn render_code_block(code: &str, lang: &str, fence: &str) -> String {
    format!("\n{fence}{lang}\n{code}\n{fence}\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(class: &str, parent: Option<(&str, usize)>) -> NodeShape {
        NodeShape {
            class: class.to_string(),
            parent: parent.map(|(class, child_count)| ParentShape {
                class: class.to_string(),
                child_count,
            }),
        }
    }

    #[test]
    fn test_own_class() {
        assert_eq!(detect_language(&shape("highlight-source-python", None)), "python");
        assert_eq!(detect_language(&shape("code highlight-text-html5 wide", None)), "html5");
        assert_eq!(detect_language(&shape("highlight-source-c", Some(("highlight-source-go", 1)))), "c");
    }

    #[test]
    fn test_parent_class() {
        assert_eq!(detect_language(&shape("", Some(("highlight-source-go", 1)))), "go");
        assert_eq!(detect_language(&shape("", Some(("highlight-source-go", 2)))), "");
        assert_eq!(detect_language(&shape("plain", Some(("container", 1)))), "");
    }

    #[test]
    fn test_no_language() {
        assert_eq!(detect_language(&shape("", None)), "");
        assert_eq!(detect_language(&shape("highlight-source-", None)), "");
        assert_eq!(detect_language(&shape("highlight-code-rust", None)), "");
        assert_eq!(detect_language(&shape("highlight-source-Rust", None)), "");
    }

    #[test]
    fn test_render_code_block() {
        assert_eq!(render_code_block("console.log(1);", "js", DEFAULT_FENCE), "\n```js\nconsole.log(1);\n```\n\n");
        assert_eq!(render_code_block("a\nb", "", "~~~"), "\n~~~\na\nb\n~~~\n\n");
    }
}
