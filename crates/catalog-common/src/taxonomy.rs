use std::collections::HashMap;

use crate::error::TaxonomyError;
use crate::normalization::{normalize_path, path_segments, title_case_slug};
use crate::types::Category;

/// Path of the synthetic root.
pub const HOME_PATH: &str = "/";

/// Routing namespace for category browsing. It has no node of its own.
pub const CATEGORY_NAMESPACE: &str = "categories";

/// Namespace for browsing by emergency priority.
pub const PRIORITY_NAMESPACE: &str = "emergency";

/// Depth of a node in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Root,
    First,
    Second,
    Third,
}

impl Level {
    fn child(self) -> Level {
        match self {
            Level::Root => Level::First,
            Level::First => Level::Second,
            Level::Second | Level::Third => Level::Third,
        }
    }
}

/// One node of the taxonomy. Children are owned; the parent is reached by
/// looking up `parent_path` in the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryNode {
    pub id: String,
    pub name: String,
    pub path: String,
    pub icon: Option<String>,
    pub level: Level,
    pub parent_path: Option<String>,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// A node whose level and parent are filled in when the store is built.
    pub fn new(id: &str, name: &str, path: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            path: normalize_path(path),
            icon: None,
            level: Level::First,
            parent_path: None,
            children: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn with_children(mut self, children: Vec<CategoryNode>) -> Self {
        self.children = children;
        self
    }
}

/// One entry of a breadcrumb trail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb {
    pub name: String,
    pub path: String,
}

/// Immutable taxonomy tree with a path index.
#[derive(Clone, Debug)]
pub struct TaxonomyStore {
    root: CategoryNode,
    /// path -> child-index chain from the root
    index: HashMap<String, Vec<usize>>,
}

impl TaxonomyStore {
    /// Build the store from a root at `/`, assigning levels and parent paths.
    pub fn from_root(mut root: CategoryNode) -> Result<Self, TaxonomyError> {
        if root.path != HOME_PATH {
            return Err(TaxonomyError::MisplacedRoot(root.path));
        }
        root.level = Level::Root;
        root.parent_path = None;

        let mut index = HashMap::new();
        index.insert(root.path.clone(), Vec::new());
        let mut chain = Vec::new();
        link_children(&mut root, &mut chain, &mut index)?;

        Ok(Self { root, index })
    }

    pub fn root(&self) -> &CategoryNode {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Exact path lookup. The empty path and `/` resolve the root.
    pub fn resolve(&self, path: &str) -> Option<&CategoryNode> {
        let chain = self.index.get(&normalize_path(path))?;
        let mut node = &self.root;
        for &i in chain {
            node = node.children.get(i)?;
        }
        Some(node)
    }

    pub fn parent(&self, node: &CategoryNode) -> Option<&CategoryNode> {
        node.parent_path.as_deref().and_then(|p| self.resolve(p))
    }

    /// Children of the node at `path`; empty when the path is unknown.
    pub fn children(&self, path: &str) -> &[CategoryNode] {
        self.resolve(path)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Depth-first walk over every node, root first.
    pub fn walk(&self) -> Vec<&CategoryNode> {
        let mut out = Vec::with_capacity(self.index.len());
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Breadcrumb trail for `path`, always starting at Home. Segments without
    /// a node get a name synthesized from the slug, so unknown or legacy
    /// routes still produce a full trail.
    pub fn breadcrumbs(&self, path: &str) -> Vec<Breadcrumb> {
        let mut trail = vec![Breadcrumb {
            name: self.root.name.clone(),
            path: self.root.path.clone(),
        }];

        let normalized = normalize_path(path);
        let mut prefix = String::new();
        for (i, segment) in path_segments(&normalized).into_iter().enumerate() {
            prefix.push('/');
            prefix.push_str(segment);

            match self.resolve(&prefix) {
                Some(node) => trail.push(Breadcrumb {
                    name: node.name.clone(),
                    path: node.path.clone(),
                }),
                None if i == 0 && segment == CATEGORY_NAMESPACE => {}
                None => trail.push(Breadcrumb {
                    name: title_case_slug(segment),
                    path: prefix.clone(),
                }),
            }
        }
        trail
    }
}

fn link_children(
    node: &mut CategoryNode,
    chain: &mut Vec<usize>,
    index: &mut HashMap<String, Vec<usize>>,
) -> Result<(), TaxonomyError> {
    let level = node.level.child();
    let parent_path = node.path.clone();
    for (i, child) in node.children.iter_mut().enumerate() {
        child.level = level;
        child.parent_path = Some(parent_path.clone());
        chain.push(i);
        if index.insert(child.path.clone(), chain.clone()).is_some() {
            return Err(TaxonomyError::DuplicatePath(child.path.clone()));
        }
        link_children(child, chain, index)?;
        chain.pop();
    }
    Ok(())
}

/// The built-in browse tree: one first-level node per category under
/// `/categories`, plus the `/emergency` priority namespace.
pub fn default_taxonomy() -> TaxonomyStore {
    let categories = Category::ALL
        .into_iter()
        .map(|c| {
            let path = format!("/{}/{}", CATEGORY_NAMESPACE, c.slug());
            CategoryNode::new(c.slug(), c.label(), &path)
                .with_icon(category_icon(c))
                .with_children(subcategories(c, &path))
        })
        .collect::<Vec<_>>();

    let emergency = CategoryNode::new(PRIORITY_NAMESPACE, "Emergency", "/emergency")
        .with_icon("siren")
        .with_children(vec![
            CategoryNode::new("critical", "Critical", "/emergency/critical").with_children(vec![
                CategoryNode::new("disk-full", "Disk Full", "/emergency/critical/disk-full"),
                CategoryNode::new("server-down", "Server Down", "/emergency/critical/server-down"),
            ]),
            CategoryNode::new("high", "High", "/emergency/high").with_children(vec![
                CategoryNode::new("memory-leak", "Memory Leak", "/emergency/high/memory-leak"),
            ]),
            CategoryNode::new("medium", "Medium", "/emergency/medium"),
            CategoryNode::new("low", "Low", "/emergency/low"),
        ]);

    let mut top = categories;
    top.push(emergency);
    let root = CategoryNode::new("home", "Home", HOME_PATH).with_children(top);

    // Static paths are unique by construction.
    match TaxonomyStore::from_root(root) {
        Ok(store) => store,
        Err(e) => unreachable!("built-in taxonomy is inconsistent: {e}"),
    }
}

fn category_icon(category: Category) -> &'static str {
    match category {
        Category::SystemAdministration => "server",
        Category::Security => "shield",
        Category::Networking => "network",
        Category::Automation => "cog",
        Category::Backup => "archive",
        Category::Monitoring => "activity",
        Category::Development => "code",
        Category::Database => "database",
    }
}

fn subcategories(category: Category, base: &str) -> Vec<CategoryNode> {
    let leaf = |slug: &str, name: &str| CategoryNode::new(slug, name, &format!("{base}/{slug}"));
    match category {
        Category::SystemAdministration => vec![
            leaf("users", "Users"),
            leaf("disk", "Disk").with_children(vec![CategoryNode::new(
                "cleanup",
                "Cleanup",
                &format!("{base}/disk/cleanup"),
            )]),
            leaf("services", "Services"),
        ],
        Category::Security => vec![
            leaf("firewall", "Firewall").with_children(vec![
                CategoryNode::new("iptables-rules", "Iptables Rules", &format!("{base}/firewall/iptables-rules")),
                CategoryNode::new("ufw", "UFW", &format!("{base}/firewall/ufw")),
            ]),
            leaf("hardening", "Hardening"),
            leaf("ssh", "SSH"),
        ],
        Category::Networking => vec![
            leaf("dns", "DNS"),
            leaf("vpn", "VPN"),
            leaf("diagnostics", "Diagnostics"),
        ],
        Category::Automation => vec![leaf("cron", "Cron"), leaf("deployment", "Deployment")],
        Category::Backup => vec![leaf("files", "Files"), leaf("snapshots", "Snapshots")],
        Category::Monitoring => vec![
            leaf("logs", "Logs"),
            leaf("alerts", "Alerts"),
            leaf("performance", "Performance"),
        ],
        Category::Development => vec![leaf("git", "Git"), leaf("docker", "Docker")],
        Category::Database => vec![leaf("mysql", "MySQL"), leaf("postgres", "PostgreSQL")],
    }
}
