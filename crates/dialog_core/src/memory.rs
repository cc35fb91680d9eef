//! In-memory composed tree implementing [`DialogDom`] for headless hosts and tests.

use std::{cell::RefCell, rc::Rc};

use crate::{dom::DialogDom, model::DialogEvent};

/// Stable handle to a node in a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

const DOCUMENT: NodeId = NodeId(0);
const BODY: NodeId = NodeId(1);

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Document,
    Element { tag: String, dialog: bool },
    ShadowRoot { host: NodeId },
}

#[derive(Debug, Clone)]
struct NodeRecord {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    shadow_root: Option<NodeId>,
}

impl NodeRecord {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            shadow_root: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Event recorded by [`MemoryDom`] when a dialog dispatches a notification.
pub struct DispatchedEvent {
    /// Element the event was dispatched from.
    pub origin: NodeId,
    /// Dispatched payload.
    pub event: DialogEvent<NodeId>,
}

#[derive(Debug)]
struct MemoryTree {
    nodes: Vec<NodeRecord>,
    focused: Option<NodeId>,
    modal_stack: Vec<NodeId>,
    dispatched: Vec<DispatchedEvent>,
}

impl MemoryTree {
    fn record(&self, node: NodeId) -> &NodeRecord {
        &self.nodes[node.0]
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != node);
        }
    }

    fn is_connected(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == DOCUMENT {
                return true;
            }
            match self.record(current).parent {
                Some(parent) => current = self.up(parent),
                None => return false,
            }
        }
    }

    /// Maps a shadow root to its host so upward walks stay in the composed tree.
    fn up(&self, node: NodeId) -> NodeId {
        match self.record(node).kind {
            NodeKind::ShadowRoot { host } => host,
            _ => node,
        }
    }

    fn is_inclusive_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.record(candidate).parent;
            if let Some(parent) = current {
                current = Some(self.up(parent));
            }
        }
        false
    }

    /// Retargets `node` into the tree rooted at `scope`, the way a document or shadow root reports
    /// its active element.
    fn retarget(&self, node: NodeId, scope: NodeId) -> Option<NodeId> {
        let mut candidate = node;
        let mut current = node;
        loop {
            let parent = self.record(current).parent?;
            if parent == scope {
                return Some(candidate);
            }
            match self.record(parent).kind {
                NodeKind::ShadowRoot { host } => {
                    candidate = host;
                    current = host;
                }
                _ => current = parent,
            }
        }
    }
}

#[derive(Debug, Clone)]
/// In-memory document with shadow roots, focus, modal presentation, and an event log.
///
/// Clones share the same tree.
pub struct MemoryDom {
    inner: Rc<RefCell<MemoryTree>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Creates a document containing an empty `body` element.
    pub fn new() -> Self {
        let mut document = NodeRecord::new(NodeKind::Document);
        let mut body = NodeRecord::new(NodeKind::Element {
            tag: "body".to_string(),
            dialog: false,
        });
        body.parent = Some(DOCUMENT);
        document.children.push(BODY);
        Self {
            inner: Rc::new(RefCell::new(MemoryTree {
                nodes: vec![document, body],
                focused: None,
                modal_stack: Vec::new(),
                dispatched: Vec::new(),
            })),
        }
    }

    /// Returns the `body` element.
    pub fn body(&self) -> NodeId {
        BODY
    }

    /// Creates a detached element.
    pub fn create_element(&self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_string(),
            dialog: false,
        })
    }

    /// Creates a detached dialog element.
    pub fn create_dialog(&self) -> NodeId {
        self.push(NodeKind::Element {
            tag: "cc-dialog".to_string(),
            dialog: true,
        })
    }

    fn push(&self, kind: NodeKind) -> NodeId {
        let mut tree = self.inner.borrow_mut();
        let id = NodeId(tree.nodes.len());
        tree.nodes.push(NodeRecord::new(kind));
        id
    }

    /// Returns the tag name of an element, or `None` for documents and shadow roots.
    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        match &self.inner.borrow().record(node).kind {
            NodeKind::Element { tag, .. } => Some(tag.clone()),
            _ => None,
        }
    }

    /// Appends `child` to `parent` (an element or shadow root), moving it if already attached.
    pub fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut tree = self.inner.borrow_mut();
        tree.detach(child);
        tree.nodes[child.0].parent = Some(parent);
        tree.nodes[parent.0].children.push(child);
    }

    /// Attaches a shadow root to `host`, returning the existing one if already attached.
    pub fn attach_shadow(&self, host: NodeId) -> NodeId {
        if let Some(root) = self.inner.borrow().record(host).shadow_root {
            return root;
        }
        let root = self.push(NodeKind::ShadowRoot { host });
        let mut tree = self.inner.borrow_mut();
        tree.nodes[root.0].parent = Some(host);
        tree.nodes[host.0].shadow_root = Some(root);
        root
    }

    /// Removes `node` (and its subtree) from its parent. Focus inside the subtree is dropped.
    pub fn remove(&self, node: NodeId) {
        let mut tree = self.inner.borrow_mut();
        if let Some(focused) = tree.focused {
            if tree.is_inclusive_descendant(focused, node) {
                tree.focused = None;
            }
        }
        tree.detach(node);
    }

    /// Returns the element that actually holds focus.
    pub fn focused(&self) -> Option<NodeId> {
        self.inner.borrow().focused
    }

    /// Returns whether `dialog` is currently presented modally.
    pub fn is_modal_open(&self, dialog: NodeId) -> bool {
        self.inner.borrow().modal_stack.contains(&dialog)
    }

    /// Returns the topmost modal dialog.
    pub fn top_modal(&self) -> Option<NodeId> {
        self.inner.borrow().modal_stack.last().copied()
    }

    /// Returns every event dispatched so far, oldest first.
    pub fn events(&self) -> Vec<DispatchedEvent> {
        self.inner.borrow().dispatched.clone()
    }

    /// Drains the event log.
    pub fn take_events(&self) -> Vec<DispatchedEvent> {
        std::mem::take(&mut self.inner.borrow_mut().dispatched)
    }
}

impl DialogDom for MemoryDom {
    type Node = NodeId;

    fn document_active_element(&self) -> Option<NodeId> {
        let tree = self.inner.borrow();
        let focused = tree.focused?;
        tree.retarget(focused, DOCUMENT)
    }

    fn shadow_active_element(&self, host: &NodeId) -> Option<NodeId> {
        let tree = self.inner.borrow();
        let root = tree.record(*host).shadow_root?;
        let focused = tree.focused?;
        tree.retarget(focused, root)
    }

    fn composed_parent(&self, node: &NodeId) -> Option<NodeId> {
        let tree = self.inner.borrow();
        let parent = tree.record(*node).parent?;
        match tree.record(parent).kind {
            NodeKind::Document => None,
            NodeKind::ShadowRoot { host } => Some(host),
            NodeKind::Element { .. } => Some(parent),
        }
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        self.inner.borrow().is_connected(*node)
    }

    fn is_dialog(&self, node: &NodeId) -> bool {
        matches!(
            self.inner.borrow().record(*node).kind,
            NodeKind::Element { dialog: true, .. }
        )
    }

    fn focus(&self, node: &NodeId) {
        let mut tree = self.inner.borrow_mut();
        if tree.is_connected(*node) {
            tree.focused = Some(*node);
        }
    }

    fn show_modal(&self, dialog: &NodeId) {
        let mut tree = self.inner.borrow_mut();
        if !tree.modal_stack.contains(dialog) {
            tree.modal_stack.push(*dialog);
        }
    }

    fn close_modal(&self, dialog: &NodeId) {
        self.inner
            .borrow_mut()
            .modal_stack
            .retain(|open| open != dialog);
    }

    fn dispatch(&self, origin: &NodeId, event: &DialogEvent<NodeId>) {
        self.inner.borrow_mut().dispatched.push(DispatchedEvent {
            origin: *origin,
            event: event.clone(),
        });
    }
}
