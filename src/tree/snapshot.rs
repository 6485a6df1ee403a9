use super::{Element, Node};
use std::fmt::{self, Display, Formatter, Write};

/// An indented, line based rendering of a document tree.
///
/// Used to print readable trees when two documents are compared. Each
/// element is printed on its own line with its attributes, each text node
/// is printed as a quoted string.
#[derive(Debug)]
pub struct Snapshot {
    lines: Vec<String>,
}

impl Snapshot {
    /// Create a new [`Snapshot`] of the given tree.
    pub fn new(root: &Node) -> Self {
        let mut lines = vec![];
        walk(root, 0, &mut lines);

        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }

        Ok(())
    }
}

fn walk(node: &Node, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Text(text) => lines.push(format!("{indent}{text:?}")),
        Node::Element(element) => {
            lines.push(format!("{indent}{}", label(element)));
            for child in &element.children {
                walk(child, depth + 1, lines);
            }
        }
    }
}

/// Return the opening tag of an element, including its attributes.
fn label(element: &Element) -> String {
    let mut buffer = format!("<{}", element.name);
    for attribute in element.attributes.iter() {
        // Writing to a String cannot fail.
        let _ = write!(buffer, " {}={:?}", attribute.name, attribute.value);
    }
    buffer.push('>');

    buffer
}

/// Describes the first difference found between two trees.
#[derive(Debug)]
pub struct Mismatch {
    /// Path from the root to the differing node.
    path: String,
    /// What differs.
    detail: String,
    expected: String,
    actual: String,
}

impl Mismatch {
    /// Return the path from the root to the differing node.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Return a short description of the difference.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "tree mismatch at {}: {}", self.path, self.detail)?;
        writeln!(f, "expected:\n{}", self.expected)?;
        writeln!(f, "actual:\n{}", self.actual)
    }
}

impl std::error::Error for Mismatch {}

/// Compare two trees, returning the first difference found.
///
/// # Errors
///
/// Returns a [`Mismatch`] describing where the trees differ, with a
/// [`Snapshot`] of both differing subtrees.
pub fn compare(expected: &Node, actual: &Node) -> Result<(), Mismatch> {
    let mut path = vec![segment(expected, None)];

    compare_nodes(expected, actual, &mut path)
}

/// Panic with a readable report if the two trees differ.
///
/// # Panics
///
/// Panics when [`compare`] finds a [`Mismatch`].
pub fn assert_tree_eq(expected: &Node, actual: &Node) {
    if let Err(mismatch) = compare(expected, actual) {
        panic!("{mismatch}");
    }
}

fn compare_nodes(expected: &Node, actual: &Node, path: &mut Vec<String>) -> Result<(), Mismatch> {
    match (expected, actual) {
        (Node::Text(left), Node::Text(right)) => {
            if left != right {
                return Err(mismatch(path, "text differs", expected, actual));
            }
        }
        (Node::Element(left), Node::Element(right)) => {
            if left.name != right.name {
                return Err(mismatch(path, "element name differs", expected, actual));
            }
            if left.attributes != right.attributes {
                return Err(mismatch(path, "attributes differ", expected, actual));
            }
            for (i, (l, r)) in left.children.iter().zip(right.children.iter()).enumerate() {
                path.push(segment(l, Some(i)));
                compare_nodes(l, r, path)?;
                path.pop();
            }
            if left.children.len() != right.children.len() {
                let detail = format!(
                    "expected {} children, found {}",
                    left.children.len(),
                    right.children.len()
                );
                return Err(mismatch(path, &detail, expected, actual));
            }
        }
        _ => return Err(mismatch(path, "node kind differs", expected, actual)),
    }

    Ok(())
}

fn segment(node: &Node, index: Option<usize>) -> String {
    let name = match node {
        Node::Element(element) => element.name.to_string(),
        Node::Text(_) => "#text".to_string(),
    };
    match index {
        Some(i) => format!("{name}[{i}]"),
        None => name,
    }
}

fn mismatch(path: &[String], detail: &str, expected: &Node, actual: &Node) -> Mismatch {
    Mismatch {
        path: path.join("/"),
        detail: detail.to_string(),
        expected: Snapshot::new(expected).to_string(),
        actual: Snapshot::new(actual).to_string(),
    }
}
