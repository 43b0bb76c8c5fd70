use serde::{Deserialize, Serialize};

/// Visual indent levels: category, subcategory, leaf.
pub const RENDERED_DEPTH: usize = 3;
const INDENT: &str = "\u{00A0}\u{00A0}\u{00A0}\u{00A0}";

/// One node of the category tree.
///
/// The API names the child list differently per level (`subcategories`, then
/// `subcategoryChildren`); both land in `children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(
        default,
        alias = "subcategories",
        alias = "subcategoryChildren",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<CategoryNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryListResponse {
    #[serde(default)]
    pub data: Vec<CategoryNode>,
}

/// A row in a category picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    /// Empty for rows that cannot be picked.
    pub value: String,
    pub label: String,
    pub depth: usize,
    pub selectable: bool,
}

/// Whether a node at `depth` may be chosen. Roots and branches are labels only.
pub fn is_selectable(node: &CategoryNode, depth: usize) -> bool {
    depth > 0 && node.is_leaf()
}

/// Flatten the tree into picker rows, depth first. Nodes deeper than
/// [`RENDERED_DEPTH`] keep the innermost indent.
pub fn render_options(roots: &[CategoryNode]) -> Vec<CategoryOption> {
    let mut out = Vec::new();
    for root in roots {
        render_node(root, 0, &mut out);
    }
    out
}

fn render_node(node: &CategoryNode, depth: usize, out: &mut Vec<CategoryOption>) {
    let selectable = is_selectable(node, depth);
    let indent = INDENT.repeat(depth.min(RENDERED_DEPTH - 1));
    out.push(CategoryOption {
        value: if selectable { node.id.clone() } else { String::new() },
        label: format!("{indent}{}", node.name),
        depth,
        selectable,
    });
    for child in &node.children {
        render_node(child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<CategoryNode> {
        vec![
            CategoryNode::new("c1", "Programming").with_children(vec![
                CategoryNode::new("s1", "Web").with_children(vec![
                    CategoryNode::new("l1", "Frontend"),
                    CategoryNode::new("l2", "Backend"),
                ]),
            ]),
            CategoryNode::new("c2", "Design"),
        ]
    }

    #[test]
    fn wire_format_with_level_specific_names() {
        let json = r#"{"data": [{"_id": "c1", "name": "Programming", "subcategories": [
            {"_id": "s1", "name": "Web", "subcategoryChildren": [{"_id": "l1", "name": "Frontend"}]}
        ]}]}"#;
        let parsed: CategoryListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data[0].children[0].children[0].id, "l1");
    }

    #[test]
    fn only_non_root_leaves_are_selectable() {
        let options = render_options(&tree());
        let picked: Vec<_> = options
            .iter()
            .filter(|o| o.selectable)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(picked, vec!["l1", "l2"]);

        let root_leaf = options.iter().find(|o| o.label == "Design").unwrap();
        assert!(!root_leaf.selectable);
        assert!(root_leaf.value.is_empty());
    }

    #[test]
    fn indentation_stops_at_three_levels() {
        let deep = vec![CategoryNode::new("a", "A").with_children(vec![
            CategoryNode::new("b", "B").with_children(vec![
                CategoryNode::new("c", "C").with_children(vec![CategoryNode::new("d", "D")]),
            ]),
        ])];
        let options = render_options(&deep);
        assert_eq!(options[1].label, format!("{INDENT}B"));
        assert_eq!(options[2].label, format!("{INDENT}{INDENT}C"));
        assert_eq!(options[3].label, format!("{INDENT}{INDENT}D"));
        assert_eq!(options[3].depth, 3);
        assert!(options[3].selectable);
        assert!(!options[2].selectable);
    }
}
