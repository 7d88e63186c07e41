use crate::{
    IdAllocator, MenuItem, MenuNode, MenuSeparator,
    template::{
        EMPTY_TEXT, FLAG_LAST, FLAG_POPUP, HEADER_LEN, ROOT_TEXT, STATE_CHECKED, STATE_DISABLED,
        TYPE_SEPARATOR, TemplateItem, encode_template, parse_template,
    },
    tests::support::item,
};

use proptest::prelude::*;

const HEADER: [u8; HEADER_LEN] = [0x01, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00];

/// Shape of a menu entry used to generate trees.
#[derive(Debug, Clone)]
enum Shape {
    Separator,
    Item { text: String, children: Option<Vec<Shape>> },
}

#[allow(clippy::unwrap_used)]
fn build(shapes: &[Shape], ids: &mut IdAllocator) -> Vec<MenuNode> {
    shapes
        .iter()
        .map(|shape| match shape {
            Shape::Separator => MenuSeparator.into(),
            Shape::Item { text, children } => {
                let mut builder = MenuItem::builder().text(text.clone());
                if let Some(children) = children {
                    builder = builder.submenu(build(children, ids));
                }
                builder.build(ids).unwrap().into()
            }
        })
        .collect()
}

fn shape_strategy() -> impl Strategy<Value = Vec<Shape>> {
    let leaf = prop_oneof![
        Just(Shape::Separator),
        "[a-zA-Z0-9 ]{0,12}".prop_map(|text| Shape::Item {
            text,
            children: None
        }),
    ];
    let tree = leaf.prop_recursive(3, 24, 4, |inner| {
        ("[a-zA-Z ]{0,8}", prop::collection::vec(inner, 0..4)).prop_map(|(text, children)| {
            Shape::Item {
                text,
                children: Some(children),
            }
        })
    });
    prop::collection::vec(tree, 0..6)
}

fn assert_lists_well_formed(item: &TemplateItem) {
    assert_eq!(item.record_len % 4, 0, "record {:?} not aligned", item.text);
    if item.has_submenu() {
        assert!(!item.children.is_empty());
        let last = item.children.len() - 1;
        for (index, child) in item.children.iter().enumerate() {
            assert_eq!(child.is_last(), index == last, "last flag of {:?}", child.text);
            assert_lists_well_formed(child);
        }
    }
}

/// WHAT: One plain item encodes to the exact expected bytes
/// WHY: The native loader rejects any deviation from the MENUEX layout
#[test]
#[allow(clippy::unwrap_used)]
fn given_single_item_when_encoding_then_bytes_match_layout() {
    // Given: A menu with one item "A" (id 1)
    let mut ids = IdAllocator::default();
    let nodes: Vec<MenuNode> = vec![item(&mut ids, "A").into()];

    // When: Encoding
    let bytes = encode_template(&nodes);

    // Then: Header, root popup record and item record are bit-exact
    #[rustfmt::skip]
    let expected: Vec<u8> = vec![
        // header
        0x01, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00,
        // root: type, state, id
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        // root: flags = last | popup
        0x81, 0x00,
        // root: "root\0"
        b'r', 0x00, b'o', 0x00, b'o', 0x00, b't', 0x00, 0x00, 0x00,
        // root: submenu helpId
        0x00, 0x00, 0x00, 0x00,
        // item: type, state
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        // item: id = 1
        0x01, 0x00, 0x00, 0x00,
        // item: flags = last
        0x80, 0x00,
        // item: "A\0"
        b'A', 0x00, 0x00, 0x00,
        // padding
        0x00, 0x00,
    ];
    assert_eq!(bytes, expected);
}

/// WHAT: Every template starts with the fixed header and a root popup
/// WHY: The loader needs a single popup menu even for flat lists
#[test]
#[allow(clippy::unwrap_used)]
fn given_flat_list_when_encoding_then_wrapped_in_root_popup() {
    // Given: Two items and a separator
    let mut ids = IdAllocator::default();
    let nodes: Vec<MenuNode> = vec![
        item(&mut ids, "One").into(),
        MenuSeparator.into(),
        item(&mut ids, "Two").into(),
    ];

    // When: Encoding and decoding
    let bytes = encode_template(&nodes);
    let root = parse_template(&bytes).unwrap();

    // Then: The root popup holds the three entries
    assert_eq!(bytes[..HEADER_LEN], HEADER);
    assert_eq!(root.text, ROOT_TEXT);
    assert_eq!(root.id, 0);
    assert_eq!(root.flags, FLAG_LAST | FLAG_POPUP);
    assert_eq!(root.children.len(), 3);
}

/// WHAT: Separators are 16-byte records of type 0x800 with id 0
/// WHY: Separators carry no text and no id
#[test]
#[allow(clippy::unwrap_used)]
fn given_separator_when_encoding_then_separator_record() {
    // Given: An item followed by a separator
    let mut ids = IdAllocator::default();
    let nodes: Vec<MenuNode> = vec![item(&mut ids, "Item").into(), MenuSeparator.into()];

    // When: Encoding and decoding
    let root = parse_template(&encode_template(&nodes)).unwrap();

    // Then: The separator record is minimal and last
    let separator = &root.children[1];
    assert_eq!(separator.kind, TYPE_SEPARATOR);
    assert!(separator.is_separator());
    assert_eq!(separator.id, 0);
    assert_eq!(separator.text, "");
    assert_eq!(separator.record_len, 16);
    assert!(separator.is_last());
}

/// WHAT: An empty menu encodes a single disabled "Empty" placeholder
/// WHY: Native popups cannot have zero items
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_list_when_encoding_then_one_placeholder() {
    // Given/When: An empty menu
    let root = parse_template(&encode_template(&[])).unwrap();

    // Then: Exactly one disabled placeholder
    assert_eq!(root.children.len(), 1);
    let placeholder = &root.children[0];
    assert_eq!(placeholder.text, EMPTY_TEXT);
    assert_eq!(placeholder.id, 0);
    assert_eq!(placeholder.state, STATE_DISABLED);
    assert!(placeholder.is_last());
    assert!(!placeholder.has_submenu());
}

/// WHAT: An empty submenu also gets the placeholder
/// WHY: The rule applies at every level
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_submenu_when_encoding_then_placeholder_inside() {
    // Given: A container with no children
    let mut ids = IdAllocator::default();
    let container = MenuItem::builder()
        .text("Nothing here")
        .submenu(Vec::<MenuNode>::new())
        .build(&mut ids)
        .unwrap();

    // When: Encoding and decoding
    let root = parse_template(&encode_template(&[MenuNode::from(container)])).unwrap();

    // Then: The container is a popup holding only the placeholder
    let container = &root.children[0];
    assert!(container.has_submenu());
    assert_eq!(container.children.len(), 1);
    assert_eq!(container.children[0].text, EMPTY_TEXT);
    assert!(container.children[0].is_disabled());
}

/// WHAT: Disabled and checked map to their state bits
/// WHY: The native menu reads display state from the template
#[test]
#[allow(clippy::unwrap_used)]
fn given_state_flags_when_encoding_then_state_bits_set() {
    // Given: A disabled item and a checked item
    let mut ids = IdAllocator::default();
    let disabled = MenuItem::builder()
        .text("Disabled")
        .disabled(true)
        .build(&mut ids)
        .unwrap();
    let checked = MenuItem::builder()
        .text("Checked")
        .checked(true)
        .build(&mut ids)
        .unwrap();

    // When: Encoding and decoding
    let root = parse_template(&encode_template(&[MenuNode::from(disabled), checked.into()])).unwrap();

    // Then: State bits match
    assert_eq!(root.children[0].state, STATE_DISABLED);
    assert_eq!(root.children[1].state, STATE_CHECKED);
    assert_eq!(root.children[0].id, 1);
    assert_eq!(root.children[1].id, 2);
}

/// WHAT: Text outside ASCII is written as UTF-16 with surrogates
/// WHY: Labels use the native wide-string encoding
#[test]
#[allow(clippy::unwrap_used)]
fn given_non_ascii_text_when_encoding_then_text_preserved() {
    // Given: A label needing a surrogate pair
    let mut ids = IdAllocator::default();
    let label = "Grüße \u{1F389}";
    let nodes: Vec<MenuNode> = vec![item(&mut ids, label).into()];

    // When: Encoding and decoding
    let root = parse_template(&encode_template(&nodes)).unwrap();

    // Then: The label survives and the record stays aligned
    assert_eq!(root.children[0].text, label);
    assert_eq!(root.children[0].record_len % 4, 0);
}

/// WHAT: A node's own encoding equals its records inside the full template
/// WHY: Node encoding and template encoding share one layout
#[test]
#[allow(clippy::unwrap_used)]
fn given_single_node_when_encoding_node_then_matches_template_tail() {
    // Given: A submenu with a separator and an item
    let mut ids = IdAllocator::default();
    let child = item(&mut ids, "Child");
    let node: MenuNode = MenuItem::builder()
        .text("Parent")
        .submenu(vec![MenuNode::from(MenuSeparator), child.into()])
        .build(&mut ids)
        .unwrap()
        .into();

    // When: Encoding the node alone and as the only entry
    let own = node.encode();
    let full = encode_template(std::slice::from_ref(&node));

    // Then: The node's bytes are the tail of the template
    assert!(full.ends_with(&own));
    assert_eq!(own.len() % 4, 0);
}

/// WHAT: Nested lists flag only their final record as last
/// WHY: Lists have no count; the last flag is what ends them
#[test]
#[allow(clippy::unwrap_used)]
fn given_nested_tree_when_encoding_then_each_list_ends_with_last_flag() {
    // Given: Items, separators and two levels of submenus
    let mut ids = IdAllocator::default();
    let shapes = vec![
        Shape::Item {
            text: "Checkable".into(),
            children: None,
        },
        Shape::Separator,
        Shape::Item {
            text: "Submenu".into(),
            children: Some(vec![
                Shape::Item {
                    text: "Submenu item".into(),
                    children: None,
                },
                Shape::Item {
                    text: "Deeper".into(),
                    children: Some(vec![Shape::Separator]),
                },
                Shape::Item {
                    text: "Counter".into(),
                    children: None,
                },
            ]),
        },
        Shape::Item {
            text: "Exit".into(),
            children: None,
        },
    ];
    let nodes = build(&shapes, &mut ids);

    // When: Encoding twice and decoding
    let first = encode_template(&nodes);
    let second = encode_template(&nodes);
    let root = parse_template(&first).unwrap();

    // Then: Output is deterministic and every list is well formed
    assert_eq!(first, second);
    assert_lists_well_formed(&root);
    assert_eq!(root.walk().len(), 9);
}

proptest! {
    #[test]
    fn encoded_trees_are_aligned_and_terminated(shapes in shape_strategy()) {
        let mut ids = IdAllocator::default();
        let nodes = build(&shapes, &mut ids);

        let bytes = encode_template(&nodes);
        prop_assert_eq!(bytes.len() % 4, 0);
        prop_assert_eq!(&bytes, &encode_template(&nodes));

        let root = parse_template(&bytes).map_err(|e| TestCaseError::fail(e.to_string()))?;
        assert_lists_well_formed(&root);
    }
}
