use crate::{
    MenuNode,
    template::{
        EMPTY_TEXT, FIRST_ITEM_OFFSET, FLAG_LAST, FLAG_POPUP, HEADER_LEN, ROOT_TEXT,
        STATE_CHECKED, STATE_DISABLED, TEMPLATE_VERSION, TYPE_SEPARATOR,
    },
};

struct Record<'a> {
    kind: u32,
    state: u32,
    id: u32,
    text: &'a str,
}

/// Encode a menu tree as a MENUEX template.
///
/// The entries are wrapped in one popup item so the result is always a
/// single popup menu, even for a flat list.
pub fn encode_template(items: &[MenuNode]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + 32 * (items.len() + 1));

    out.extend_from_slice(&TEMPLATE_VERSION.to_le_bytes());
    out.extend_from_slice(&FIRST_ITEM_OFFSET.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // helpId

    let root = Record {
        kind: 0,
        state: 0,
        id: 0,
        text: ROOT_TEXT,
    };
    write_record(&mut out, &root, true, true);
    encode_list(&mut out, items);

    out
}

/// Encode one node (and its submenu) at the end of `out`.
pub(crate) fn encode_node(out: &mut Vec<u8>, node: &MenuNode, is_last: bool) {
    match node {
        MenuNode::Separator(_) => {
            let record = Record {
                kind: TYPE_SEPARATOR,
                state: 0,
                id: 0,
                text: "",
            };
            write_record(out, &record, is_last, false);
        }
        MenuNode::Item(item) => {
            let text = item.text();
            let mut state = 0;
            if item.disabled() {
                state |= STATE_DISABLED;
            }
            if item.checked() {
                state |= STATE_CHECKED;
            }

            let children = item.children();
            let record = Record {
                kind: 0,
                state,
                id: item.id().get(),
                text: &text,
            };
            write_record(out, &record, is_last, children.is_some());

            if let Some(children) = children {
                encode_list(out, &children);
            }
        }
    }
}

fn encode_list(out: &mut Vec<u8>, nodes: &[MenuNode]) {
    let Some((last, rest)) = nodes.split_last() else {
        // Native popups cannot be empty.
        let placeholder = Record {
            kind: 0,
            state: STATE_DISABLED,
            id: 0,
            text: EMPTY_TEXT,
        };
        write_record(out, &placeholder, true, false);
        return;
    };

    for node in rest {
        encode_node(out, node, false);
    }
    encode_node(out, last, true);
}

fn write_record(out: &mut Vec<u8>, record: &Record<'_>, is_last: bool, has_popup: bool) {
    let start = out.len();

    let mut flags = 0u16;
    if is_last {
        flags |= FLAG_LAST;
    }
    if has_popup {
        flags |= FLAG_POPUP;
    }

    out.extend_from_slice(&record.kind.to_le_bytes());
    out.extend_from_slice(&record.state.to_le_bytes());
    out.extend_from_slice(&record.id.to_le_bytes());
    out.extend_from_slice(&flags.to_le_bytes());
    for unit in record.text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out.extend_from_slice(&0u16.to_le_bytes());

    while (out.len() - start) % 4 != 0 {
        out.push(0);
    }

    if has_popup {
        out.extend_from_slice(&0u32.to_le_bytes()); // submenu helpId
    }
}
