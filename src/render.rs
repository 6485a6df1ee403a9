use crate::{
    engine::Filler,
    log::{
        Error, Kind, MISPLACED_BLOCK, NESTED_BLOCK, UNEXPECTED_BLOCK_END, UNMATCHED_BLOCK,
        UNRESOLVED_BLOCK, UNRESOLVED_PLACEHOLDER,
    },
    pipe::stringify,
    region::Region,
    scan::{Found, Path, Scan, Tag},
    store::Scope,
    tree::{Element, Node},
};
use serde_json::Value;
use tracing::{debug, trace, warn};

/// Fill a document with the given data using the default [`Filler`].
///
/// Provides a shortcut to quickly fill a document when no configuration
/// is needed.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use xmlfill::{fill, odf, Element, Node};
///
/// let document: Node = Element::new(odf::text("p"))
///     .with_text("Dear {{Name}},")
///     .into();
/// let filled = fill(&document, &json!({"Name": "Maria"})).unwrap();
///
/// assert_eq!(filled.text_content(), "Dear Maria,");
/// ```
pub fn fill(document: &Node, data: &Value) -> Result<Node, Error> {
    Filler::default().fill(document, data)
}

/// A child node, classified by the role it plays in the template.
struct Part<'template> {
    /// Position of the node among its siblings.
    index: usize,
    node: &'template Node,
    role: Role,
}

enum Role {
    /// A paragraph holding nothing but `{{#Name}}`.
    Open(Path, Region, String),
    /// A paragraph holding nothing but `{{/Name}}`.
    Close(Path, Region, String),
    /// A paragraph, with the placeholders found in its text.
    Paragraph(Scan),
    /// A text node outside of any paragraph.
    Text(Scan),
    /// Any other element.
    Element,
}

/// Walks a template, expanding blocks and substituting placeholders.
pub struct Renderer<'filler, 'data> {
    /// Configuration for this render.
    filler: &'filler Filler,
    /// The data that placeholders are resolved against.
    scope: Scope<'data>,
    /// Labels of the elements between the root and the current position.
    path: Vec<String>,
}

impl<'filler, 'data> Renderer<'filler, 'data> {
    /// Create a new Renderer.
    pub fn new(filler: &'filler Filler, data: &'data Value) -> Self {
        Self {
            filler,
            scope: Scope::new(data),
            path: vec![],
        }
    }

    /// Render the given document.
    ///
    /// The whole template is checked before any output is produced, so
    /// template errors are reported no matter what the data holds.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the template is malformed, or the data does
    /// not resolve in strict mode.
    pub fn render(&mut self, document: &Node) -> Result<Node, Error> {
        debug!(strict = self.filler.is_strict(), "filling document");

        let parts = self.classify(std::slice::from_ref(document))?;
        self.check(&parts)?;
        self.path.clear();

        let mut output = self.render_parts(&parts)?;
        match output.pop() {
            Some(node) if output.is_empty() => Ok(node),
            _ => Err(Error::build(MISPLACED_BLOCK)
                .with_kind(Kind::Structure)
                .with_help("the root of a document cannot be a block marker")),
        }
    }

    /// Classify every node of a sibling sequence.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if scanning a paragraph or text node fails, or
    /// if a block marker shares its paragraph with other content.
    fn classify<'template>(
        &self,
        nodes: &'template [Node],
    ) -> Result<Vec<Part<'template>>, Error> {
        let scanner = self.filler.scanner();
        let mut parts = Vec::with_capacity(nodes.len());

        for (index, node) in nodes.iter().enumerate() {
            let role = match node {
                Node::Text(_) => {
                    let scan = scanner
                        .scan(node)
                        .map_err(|e| e.or_name(self.locate(node, index)))?;
                    if let Some(found) = scan.first_block() {
                        return Err(self.error_misplaced(&scan, found, node, index));
                    }
                    Role::Text(scan)
                }
                Node::Element(element) if self.filler.is_paragraph(&element.name) => {
                    let scan = scanner
                        .scan(node)
                        .map_err(|e| e.or_name(self.locate(node, index)))?;
                    match scan.first_block() {
                        None => Role::Paragraph(scan),
                        Some(found) if !scan.is_alone(found) => {
                            return Err(self.error_misplaced(&scan, found, node, index))
                        }
                        Some(Found { tag, region }) => {
                            let text = scan.segments.text.clone();
                            match tag {
                                Tag::Open(path) => Role::Open(path.clone(), *region, text),
                                Tag::Close(path) => Role::Close(path.clone(), *region, text),
                                Tag::Placeholder(_) => unreachable!(),
                            }
                        }
                    }
                }
                Node::Element(_) => Role::Element,
            };

            parts.push(Part { index, node, role });
        }

        Ok(parts)
    }

    /// Check that every block in the given parts, and below them, is
    /// properly closed.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] for unmatched, stray or mis-nested markers, and
    /// for any tag that cannot be scanned.
    fn check(&mut self, parts: &[Part]) -> Result<(), Error> {
        let mut i = 0;

        while i < parts.len() {
            let part = &parts[i];
            match &part.role {
                Role::Open(..) => {
                    let j = self.find_close(parts, i)?;
                    self.check(&parts[i + 1..j])?;
                    i = j + 1;
                    continue;
                }
                Role::Close(path, region, text) => {
                    return Err(self.error_stray_close(path, *region, text, part));
                }
                Role::Element => {
                    let element = expect_element(part.node);
                    self.path.push(label(part.node, part.index, self.path.is_empty()));
                    let children = self.classify(&element.children)?;
                    self.check(&children)?;
                    self.path.pop();
                }
                Role::Paragraph(_) | Role::Text(_) => {}
            }
            i += 1;
        }

        Ok(())
    }

    /// Render a sequence of sibling parts.
    ///
    /// Each block is replaced with one copy of its body per item, the body
    /// being rendered with the item pushed onto the scope.
    fn render_parts(&mut self, parts: &[Part]) -> Result<Vec<Node>, Error> {
        let mut output = Vec::with_capacity(parts.len());
        let mut i = 0;

        while i < parts.len() {
            let part = &parts[i];
            match &part.role {
                Role::Open(path, region, text) => {
                    let j = self.find_close(parts, i)?;
                    let body = &parts[i + 1..j];
                    let items = self.resolve_block(path, *region, text, part)?;
                    debug!(block = %path, items = items.len(), "expanding block");

                    for item in items {
                        self.scope.push(item);
                        let rendered = self.render_parts(body);
                        self.scope.pop();
                        output.extend(rendered?);
                    }
                    i = j + 1;
                    continue;
                }
                Role::Close(path, region, text) => {
                    return Err(self.error_stray_close(path, *region, text, part));
                }
                Role::Paragraph(scan) => {
                    let element = expect_element(part.node);
                    output.push(self.substitute_element(element, scan, part)?);
                }
                Role::Text(scan) => {
                    output.push(Node::Text(self.substitute_text(scan, part, 0)?));
                }
                Role::Element => {
                    let element = expect_element(part.node);
                    output.push(self.render_element(element, part)?);
                }
            }
            i += 1;
        }

        Ok(output)
    }

    /// Render an element that is not a paragraph by rendering its children.
    fn render_element(&mut self, element: &Element, part: &Part) -> Result<Node, Error> {
        self.path.push(label(part.node, part.index, self.path.is_empty()));
        let parts = self.classify(&element.children)?;
        let children = self.render_parts(&parts)?;
        self.path.pop();

        Ok(Node::Element(Element {
            name: element.name.clone(),
            attributes: element.attributes.clone(),
            children,
        }))
    }

    /// Return the index of the part closing the block opened at `open`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the block is never closed at this level, or
    /// if a block with the same name is opened before it is closed.
    fn find_close(&self, parts: &[Part], open: usize) -> Result<usize, Error> {
        let (name, region, text) = match &parts[open].role {
            Role::Open(path, region, text) => (path, *region, text),
            _ => unreachable!("find_close must start at an opening marker"),
        };

        for (j, part) in parts.iter().enumerate().skip(open + 1) {
            match &part.role {
                Role::Open(path, inner, inner_text) if path == name => {
                    return Err(Error::build(NESTED_BLOCK)
                        .with_kind(Kind::Structure)
                        .with_pointer(inner_text, *inner)
                        .with_name(self.locate(part.node, part.index))
                        .with_help(format!(
                            "block `{name}` is opened again before it is closed, \
                            close the first block or rename one of them"
                        )));
                }
                Role::Close(path, ..) if path == name => return Ok(j),
                _ => {}
            }
        }

        let closing = self.marker(self.filler.syntax().block().1, name);
        Err(Error::build(UNMATCHED_BLOCK)
            .with_kind(Kind::Structure)
            .with_pointer(text, region)
            .with_name(self.locate(parts[open].node, parts[open].index))
            .with_help(format!(
                "block `{name}` is never closed, add a paragraph holding only \
                `{closing}` after the block body, at the same level"
            )))
    }

    /// Resolve the items of a block.
    ///
    /// A list yields each of its items. An object yields itself once, `true`
    /// yields the current scope once, `false` and null yield nothing.
    ///
    /// # Errors
    ///
    /// In strict mode, returns an [`Error`] if the name does not resolve,
    /// or resolves to a string or number.
    fn resolve_block(
        &self,
        path: &Path,
        region: Region,
        text: &str,
        part: &Part,
    ) -> Result<Vec<&'data Value>, Error> {
        let value = self.scope.lookup(path.keys());
        let items = match value {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(object @ Value::Object(_)) => vec![object],
            Some(Value::Bool(true)) => vec![self.scope.current()],
            Some(Value::Bool(false)) | Some(Value::Null) => vec![],
            _ => {
                let help = match value {
                    Some(other) => format!("block `{path}` expects a list, found `{other}`"),
                    None => format!("block `{path}` was not found in the data"),
                };
                if self.filler.is_strict() {
                    return Err(Error::build(UNRESOLVED_BLOCK)
                        .with_kind(Kind::Binding)
                        .with_pointer(text, region)
                        .with_name(self.locate(part.node, part.index))
                        .with_help(help));
                }
                warn!(block = %path, "{help}, rendering no items");
                vec![]
            }
        };

        Ok(items)
    }

    /// Substitute every placeholder in a paragraph.
    ///
    /// Only the text nodes holding a placeholder change, the element
    /// structure is copied as is.
    fn substitute_element(
        &self,
        element: &Element,
        scan: &Scan,
        part: &Part,
    ) -> Result<Node, Error> {
        if scan.found.is_empty() {
            return Ok(Node::Element(element.clone()));
        }

        let texts = (0..scan.segments.bounds.len())
            .map(|segment| self.substitute_text(scan, part, segment))
            .collect::<Result<Vec<_>, _>>()?;

        let mut output = Node::Element(element.clone());
        let mut texts = texts.into_iter();
        replace_text(&mut output, &mut texts);

        Ok(output)
    }

    /// Return the text of the given segment with its placeholders replaced.
    fn substitute_text(&self, scan: &Scan, part: &Part, segment: usize) -> Result<String, Error> {
        let bound = scan.segments.bounds[segment];
        let source = scan.segments.segment(segment);
        let mut buffer = String::with_capacity(source.len());
        let mut cursor = 0;

        for found in scan.found.iter().filter(|f| bound.contains(f.region)) {
            let path = match &found.tag {
                Tag::Placeholder(path) => path,
                _ => continue,
            };
            let local = found.region.shift_back(bound.begin);
            buffer.push_str(&source[cursor..local.begin]);
            buffer.push_str(&self.resolve_placeholder(path, found.region, scan, part)?);
            cursor = local.end;
        }
        buffer.push_str(&source[cursor..]);

        Ok(buffer)
    }

    /// Return the text that a placeholder is replaced with.
    ///
    /// # Errors
    ///
    /// In strict mode, returns an [`Error`] if the path does not resolve, or
    /// if `this` refers to a list or object.
    fn resolve_placeholder(
        &self,
        path: &Path,
        region: Region,
        scan: &Scan,
        part: &Part,
    ) -> Result<String, Error> {
        let value = self.scope.lookup(path.keys());
        trace!(placeholder = %path, found = value.is_some(), "substituting");

        if self.filler.is_strict() {
            let help = match value {
                None => Some(format!("`{path}` was not found in the data")),
                Some(Value::Array(_)) | Some(Value::Object(_)) if path.is_this() => Some(
                    "`this` refers to a list or object, use a block or name a field instead"
                        .to_string(),
                ),
                _ => None,
            };
            if let Some(help) = help {
                return Err(Error::build(UNRESOLVED_PLACEHOLDER)
                    .with_kind(Kind::Binding)
                    .with_pointer(&scan.segments.text, region)
                    .with_name(self.locate(part.node, part.index))
                    .with_help(help));
            }
        }

        Ok(stringify(value, self.filler.null_text()))
    }

    /// Return the position of a node, such as `office:text/text:p[3]`.
    fn locate(&self, node: &Node, index: usize) -> String {
        let own = label(node, index, self.path.is_empty());
        if self.path.is_empty() {
            return own;
        }

        format!("{}/{own}", self.path.join("/"))
    }

    fn error_misplaced(&self, scan: &Scan, found: &Found, node: &Node, index: usize) -> Error {
        Error::build(MISPLACED_BLOCK)
            .with_kind(Kind::Structure)
            .with_pointer(&scan.segments.text, found.region)
            .with_name(self.locate(node, index))
            .with_help(
                "a block marker must be the only content of its own paragraph, \
                move the surrounding text into a separate paragraph",
            )
    }

    fn error_stray_close(&self, path: &Path, region: Region, text: &str, part: &Part) -> Error {
        let opening = self.marker(self.filler.syntax().block().0, path);
        Error::build(UNEXPECTED_BLOCK_END)
            .with_kind(Kind::Structure)
            .with_pointer(text, region)
            .with_name(self.locate(part.node, part.index))
            .with_help(format!(
                "block `{path}` is closed but was never opened at this level, \
                add a paragraph holding only `{opening}` before it"
            ))
    }

    /// Return a block tag as the template author would write it.
    fn marker(&self, sigil: char, path: &Path) -> String {
        let (begin, end) = self.filler.syntax().tag();

        format!("{begin}{sigil}{path}{end}")
    }
}

/// Overwrite the text nodes of the tree, in document order, with the given
/// texts.
fn replace_text(node: &mut Node, texts: &mut impl Iterator<Item = String>) {
    match node {
        Node::Text(text) => {
            if let Some(next) = texts.next() {
                *text = next;
            }
        }
        Node::Element(element) => {
            for child in element.children.iter_mut() {
                replace_text(child, texts);
            }
        }
    }
}

/// Return the label of a node within a position, `name[index]`, or only
/// the name for the root.
fn label(node: &Node, index: usize, root: bool) -> String {
    let name = match node {
        Node::Element(element) => element.name.to_string(),
        Node::Text(_) => "#text".to_string(),
    };
    if root {
        return name;
    }

    format!("{name}[{index}]")
}

fn expect_element(node: &Node) -> &Element {
    node.as_element()
        .expect("parts classified as elements must hold an element")
}

#[cfg(test)]
mod tests {
    use super::fill;
    use crate::{
        engine::Filler,
        log::Kind,
        tree::{assert_tree_eq, odf, Element, Node},
    };
    use serde_json::json;

    fn p(text: &str) -> Element {
        Element::new(odf::text("p")).with_text(text)
    }

    fn span(text: &str) -> Element {
        Element::new(odf::text("span")).with_text(text)
    }

    fn body(children: Vec<Element>) -> Node {
        children
            .into_iter()
            .fold(Element::new(odf::office("text")), |body, child| {
                body.with_child(child)
            })
            .into()
    }

    fn cell(text: &str) -> Element {
        Element::new(odf::table("table-cell")).with_child(p(text))
    }

    fn row(cells: &[&str]) -> Element {
        cells
            .iter()
            .fold(Element::new(odf::table("table-row")), |row, text| {
                row.with_child(cell(text))
            })
    }

    fn list_item(child: Element) -> Element {
        Element::new(odf::text("list-item")).with_child(child)
    }

    #[test]
    fn test_fill_this() {
        let document = body(vec![p(
            "Hello, my name is {{this}} and I like test driver development",
        )]);
        let expected = body(vec![p(
            "Hello, my name is Maria and I like test driver development",
        )]);

        assert_tree_eq(&expected, &fill(&document, &json!("Maria")).unwrap());
    }

    #[test]
    fn test_fill_nested_span() {
        let document = body(vec![p("Hello, my name is ")
            .with_child(span("{{this}}"))
            .with_text(" and I like test driver development")]);
        let expected = body(vec![p("Hello, my name is ")
            .with_child(span("Maria"))
            .with_text(" and I like test driver development")]);

        assert_tree_eq(&expected, &fill(&document, &json!("Maria")).unwrap());
    }

    #[test]
    fn test_fill_without_tags_is_identity() {
        let document = body(vec![
            p("Nothing to see").with_child(span(" here")),
            Element::new(odf::table("table")).with_child(row(&["a", "b"])),
        ]);

        assert_tree_eq(&document, &fill(&document, &json!({"A": 1})).unwrap());
    }

    #[test]
    fn test_fill_list_block() {
        let item = list_item(
            Element::new(odf::text("list"))
                .with_child(list_item(p("With love from {{X}} and {{Y}}"))),
        );
        let filled_item = |x: &str, y: &str| {
            list_item(
                Element::new(odf::text("list"))
                    .with_child(list_item(p(&format!("With love from {x} and {y}")))),
            )
        };
        let document = body(vec![
            p("Before"),
            p("{{#List}}"),
            Element::new(odf::text("list")).with_child(item),
            p("{{/List}}"),
            p("After"),
        ]);
        let data = json!({"List": [
            {"A": "A1", "X": "X1", "Y": "Y1"},
            {"A": "A2", "X": "X2", "Y": "Y2"},
        ]});
        let expected = body(vec![
            p("Before"),
            Element::new(odf::text("list")).with_child(filled_item("X1", "Y1")),
            Element::new(odf::text("list")).with_child(filled_item("X2", "Y2")),
            p("After"),
        ]);

        assert_tree_eq(&expected, &fill(&document, &data).unwrap());
    }

    #[test]
    fn test_fill_table_block() {
        let table = |cells: &[&str]| {
            Element::new(odf::table("table"))
                .with_attribute(odf::table("name"), "Table1")
                .with_child(Element::new(odf::table("table-column")))
                .with_child(row(&["Name", "Grade", "Year"]))
                .with_child(row(cells))
        };
        let document = body(vec![
            p("{{#this}}"),
            table(&["{{A}}", "{{B}}", "{{C}}"]),
            p("{{/this}}"),
        ]);
        let data = json!([
            {"A": "Ana", "B": 10, "C": 2},
            {"A": "Ion", "B": 9.5, "C": 3},
        ]);
        let expected = body(vec![table(&["Ana", "10", "2"]), table(&["Ion", "9.5", "3"])]);

        assert_tree_eq(&expected, &fill(&document, &data).unwrap());
    }

    #[test]
    fn test_fill_empty_block() {
        let document = body(vec![
            p("{{#List}}"),
            p("{{X}}"),
            p("{{/List}}"),
            p("end"),
        ]);

        assert_tree_eq(
            &body(vec![p("end")]),
            &fill(&document, &json!({"List": []})).unwrap(),
        );
    }

    #[test]
    fn test_fill_sibling_and_nested_blocks() {
        let document = body(vec![
            p("{{#Groups}}"),
            p("Group {{Name}}"),
            p("{{#Students}}"),
            p("{{this}} of {{Name}} in {{Faculty}}"),
            p("{{/Students}}"),
            p("{{/Groups}}"),
            p("{{#Tags}}"),
            p("#{{this}}"),
            p("{{/Tags}}"),
        ]);
        let data = json!({
            "Faculty": "Mathematics",
            "Groups": [
                {"Name": "921", "Students": ["Ana", "Ion"]},
                {"Name": "922", "Students": []},
            ],
            "Tags": ["a", "b"],
        });
        let expected = body(vec![
            p("Group 921"),
            p("Ana of 921 in Mathematics"),
            p("Ion of 921 in Mathematics"),
            p("Group 922"),
            p("#a"),
            p("#b"),
        ]);

        assert_tree_eq(&expected, &fill(&document, &data).unwrap());
    }

    #[test]
    fn test_fill_object_and_bool_blocks() {
        let document = body(vec![
            p("{{#Dean}}"),
            p("{{Name}}"),
            p("{{/Dean}}"),
            p("{{#Signed}}"),
            p("Signed by {{Student}}"),
            p("{{/Signed}}"),
            p("{{#Draft}}"),
            p("Draft"),
            p("{{/Draft}}"),
            p("{{#Notes}}"),
            p("{{this}}"),
            p("{{/Notes}}"),
        ]);
        let data = json!({
            "Dean": {"Name": "Popescu"},
            "Signed": true,
            "Draft": false,
            "Notes": null,
            "Student": "Maria",
        });
        let expected = body(vec![p("Popescu"), p("Signed by Maria")]);

        assert_tree_eq(&expected, &fill(&document, &data).unwrap());
    }

    #[test]
    fn test_fill_dotted_path_and_missing() {
        let document = body(vec![p("{{Student.Name}}, {{Student.Grades.0}}[{{Missing}}]")]);
        let data = json!({"Student": {"Name": "Ana", "Grades": [10]}});

        assert_tree_eq(
            &body(vec![p("Ana, 10[]")]),
            &fill(&document, &data).unwrap(),
        );
    }

    #[test]
    fn test_fill_split_block_marker() {
        let document = body(vec![
            Element::new(odf::text("p"))
                .with_child(span("{{#"))
                .with_child(span("List}}")),
            p("{{this}}"),
            p(" {{/List}} "),
        ]);

        assert_tree_eq(
            &body(vec![p("1"), p("2")]),
            &fill(&document, &json!({"List": [1, 2]})).unwrap(),
        );
    }

    #[test]
    fn test_unmatched_block() {
        let document = body(vec![p("{{#List}}"), p("{{X}}")]);
        let error = fill(&document, &json!({"List": []})).unwrap_err();

        assert_eq!(error.kind(), Kind::Structure);
        assert_eq!(error.get_name(), Some("office:text/text:p[0]"));
        assert!(error.help().unwrap().contains("{{/List}}"));
    }

    #[test]
    fn test_unmatched_block_at_different_level() {
        let document = body(vec![
            p("{{#List}}"),
            Element::new(odf::table("table")).with_child(row(&["{{/List}}"])),
        ]);
        let error = fill(&document, &json!({})).unwrap_err();

        assert_eq!(error.kind(), Kind::Structure);
    }

    #[test]
    fn test_stray_block_end() {
        let document = body(vec![p("text"), p("{{/List}}")]);
        let error = fill(&document, &json!({})).unwrap_err();

        assert_eq!(error.kind(), Kind::Structure);
        assert_eq!(error.get_name(), Some("office:text/text:p[1]"));
        assert!(error.help().unwrap().contains("{{#List}}"));
    }

    #[test]
    fn test_nested_block_with_same_name() {
        let document = body(vec![
            p("{{#List}}"),
            p("{{#List}}"),
            p("{{/List}}"),
            p("{{/List}}"),
        ]);
        let error = fill(&document, &json!({"List": []})).unwrap_err();

        assert_eq!(error.kind(), Kind::Structure);
        assert_eq!(error.get_name(), Some("office:text/text:p[1]"));
    }

    #[test]
    fn test_misplaced_block() {
        let document = body(vec![p("Items: {{#List}}"), p("{{/List}}")]);
        let error = fill(&document, &json!({"List": []})).unwrap_err();

        assert_eq!(error.kind(), Kind::Structure);
        assert!(error.is_template_error());
    }

    #[test]
    fn test_template_error_ignores_data() {
        let document = body(vec![
            p("{{#Empty}}"),
            p("{{Broken"),
            p("{{/Empty}}"),
        ]);
        let error = fill(&document, &json!({"Empty": []})).unwrap_err();

        assert_eq!(error.kind(), Kind::Syntax);
    }

    #[test]
    fn test_split_placeholder_is_layout_error() {
        let nested = body(vec![Element::new(odf::text("p")).with_child(
            Element::new(odf::text("span"))
                .with_text("{{")
                .with_child(span("this"))
                .with_text("}}"),
        )]);
        let outside = body(vec![Element::new(odf::text("p"))
            .with_text("Hello {{")
            .with_child(span("this"))
            .with_text("}} bye")]);

        for document in [nested, outside] {
            let error = fill(&document, &json!("Maria")).unwrap_err();

            assert_eq!(error.kind(), Kind::Layout);
            assert_eq!(error.get_name(), Some("office:text/text:p[0]"));
        }
    }

    #[test]
    fn test_strict_placeholder() {
        let filler = Filler::new().with_strict(true);
        let document = body(vec![p("{{Missing}}")]);
        let error = filler.fill(&document, &json!({})).unwrap_err();

        assert_eq!(error.kind(), Kind::Binding);
        assert!(error.is_data_error());

        let document = body(vec![p("{{this}}")]);
        let error = filler.fill(&document, &json!(["a"])).unwrap_err();
        assert_eq!(error.kind(), Kind::Binding);

        let document = body(vec![p("{{Present}}")]);
        assert!(filler.fill(&document, &json!({"Present": null})).is_ok());
    }

    #[test]
    fn test_strict_block() {
        let document = body(vec![p("{{#List}}"), p("x"), p("{{/List}}")]);

        let error = Filler::new()
            .with_strict(true)
            .fill(&document, &json!({"List": "abc"}))
            .unwrap_err();
        assert_eq!(error.kind(), Kind::Binding);

        let filled = Filler::new().fill(&document, &json!({"List": "abc"})).unwrap();
        assert_tree_eq(&body(vec![]), &filled);
    }

    #[test]
    fn test_text_outside_paragraph() {
        let document: Node = Element::new(odf::table("table-cell"))
            .with_text("{{A}}")
            .with_child(p("{{B}}"))
            .into();
        let expected: Node = Element::new(odf::table("table-cell"))
            .with_text("1")
            .with_child(p("2"))
            .into();

        assert_tree_eq(&expected, &fill(&document, &json!({"A": 1, "B": 2})).unwrap());
    }

    #[test]
    fn test_block_outside_paragraph_is_misplaced() {
        let document: Node = Element::new(odf::office("text"))
            .with_text("{{#List}}")
            .into();
        let error = fill(&document, &json!({})).unwrap_err();

        assert_eq!(error.kind(), Kind::Structure);
    }

    #[test]
    fn test_root_block_marker() {
        let error = fill(&p("{{#List}}").into(), &json!({})).unwrap_err();

        assert_eq!(error.kind(), Kind::Structure);
    }
}
