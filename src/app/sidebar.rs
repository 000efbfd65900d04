//! Connection tree: each connection node with its tables underneath.

use crate::domain::TableInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionNode {
    pub name: String,
    pub connected: bool,
    pub expanded: bool,
    pub tables: Vec<TableInfo>,
}

impl ConnectionNode {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connected: false,
            expanded: false,
            tables: Vec::new(),
        }
    }
}

/// A visible row of the tree. Indexes point into `nodes` and their tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarItem {
    Connection(usize),
    Table(usize, usize),
}

#[derive(Debug, Clone, Default)]
pub struct SidebarState {
    pub nodes: Vec<ConnectionNode>,
    pub cursor: usize,
    pub filter: String,
    pub filtering: bool,
}

impl SidebarState {
    /// Rebuilds the node list from configured names, keeping the state of
    /// nodes that still exist.
    pub fn sync_connections<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        let mut previous = std::mem::take(&mut self.nodes);
        self.nodes = names
            .into_iter()
            .map(|name| match previous.iter().position(|n| n.name == name) {
                Some(idx) => previous.swap_remove(idx),
                None => ConnectionNode::new(name),
            })
            .collect();
        self.clamp_cursor();
    }

    fn matches_filter(&self, table: &TableInfo) -> bool {
        if self.filter.is_empty() {
            return true;
        }
        let needle = self.filter.to_lowercase();
        table.display_name().to_lowercase().contains(&needle)
    }

    /// Connections are always listed; tables only under expanded nodes and
    /// only when they match the filter.
    pub fn items(&self) -> Vec<SidebarItem> {
        let mut items = Vec::new();
        for (n, node) in self.nodes.iter().enumerate() {
            items.push(SidebarItem::Connection(n));
            if node.expanded {
                items.extend(
                    node.tables
                        .iter()
                        .enumerate()
                        .filter(|(_, t)| self.matches_filter(t))
                        .map(|(t, _)| SidebarItem::Table(n, t)),
                );
            }
        }
        items
    }

    pub fn selected(&self) -> Option<SidebarItem> {
        self.items().get(self.cursor).copied()
    }

    pub fn node(&self, idx: usize) -> Option<&ConnectionNode> {
        self.nodes.get(idx)
    }

    pub fn node_named(&self, name: &str) -> Option<&ConnectionNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    fn node_named_mut(&mut self, name: &str) -> Option<&mut ConnectionNode> {
        self.nodes.iter_mut().find(|n| n.name == name)
    }

    pub fn table(&self, node: usize, table: usize) -> Option<(&ConnectionNode, &TableInfo)> {
        let node = self.nodes.get(node)?;
        node.tables.get(table).map(|t| (node, t))
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.items().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn move_by(&mut self, delta: isize) {
        let last = self.items().len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn select_first(&mut self) {
        self.cursor = 0;
    }

    pub fn select_last(&mut self) {
        self.cursor = self.items().len().saturating_sub(1);
    }

    pub fn select_connection(&mut self, name: &str) {
        if let Some(pos) = self.items().iter().position(|item| {
            matches!(item, SidebarItem::Connection(n) if self.nodes[*n].name == name)
        }) {
            self.cursor = pos;
        }
    }

    /// Replaces the table list and marks the node connected and expanded.
    pub fn load_tables(&mut self, name: &str, tables: Vec<TableInfo>) {
        if let Some(node) = self.node_named_mut(name) {
            node.tables = tables;
            node.connected = true;
            node.expanded = true;
        }
        self.clamp_cursor();
    }

    pub fn mark_connected(&mut self, name: &str) {
        if let Some(node) = self.node_named_mut(name) {
            node.connected = true;
        }
    }

    pub fn mark_disconnected(&mut self, name: &str) {
        if let Some(node) = self.node_named_mut(name) {
            node.connected = false;
            node.expanded = false;
            node.tables.clear();
        }
        self.clamp_cursor();
    }

    pub fn collapse(&mut self, name: &str) {
        if let Some(node) = self.node_named_mut(name) {
            node.expanded = false;
        }
        self.select_connection(name);
    }

    pub fn is_connected(&self, name: &str) -> bool {
        self.node_named(name).is_some_and(|n| n.connected)
    }

    pub fn label(&self, item: SidebarItem) -> String {
        match item {
            SidebarItem::Connection(n) => {
                let node = &self.nodes[n];
                let marker = match (node.connected, node.expanded) {
                    (true, true) => "● ▾ ",
                    (true, false) => "● ▸ ",
                    (false, _) => "○   ",
                };
                format!("{}{}", marker, node.name)
            }
            SidebarItem::Table(n, t) => format!("    {}", self.nodes[n].tables[t].display_name()),
        }
    }

    pub fn start_filter(&mut self) {
        self.filtering = true;
    }

    pub fn push_filter(&mut self, c: char) {
        self.filter.push(c);
        self.clamp_cursor();
    }

    pub fn pop_filter(&mut self) {
        self.filter.pop();
        self.clamp_cursor();
    }

    /// Keeps the filter text and leaves typing mode.
    pub fn apply_filter(&mut self) {
        self.filtering = false;
    }

    pub fn clear_filter(&mut self) {
        self.filtering = false;
        self.filter.clear();
        self.clamp_cursor();
    }
}
