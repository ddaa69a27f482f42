//! Reduced ordered binary decision diagrams over a numbered variable pool
//!
//! This module is the Boolean kernel of the solver. It maintains a canonical
//! representation of Boolean functions as ROBDDs under the natural ordering of
//! variable indices:
//!
//! - **Canonical representation**: equivalent functions share one root node
//! - **Hash consing**: a unique table keeps one node per `(var, low, high)`
//! - **Operation caching**: ITE, compose, and abstraction results are memoized
//! - **Stable handles**: the node store only ever grows, so a `NodeId` stays
//!   valid for the manager's lifetime
//!
//! Variables are plain indices. The solver carves the index space into a
//! dictionary region, a clue-terminator region, and a grid region (see
//! [`crate::layout`]); the kernel itself is agnostic of that split.
//!
//! A [`Bdd`] is an owned handle: the root node plus a shared reference to its
//! [`BddManager`]. Dropping the handle releases it, and rebinding a variable
//! releases the previous handle first, so there is no manual reference
//! counting anywhere in the crate.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, RwLock};

pub(crate) mod image;
#[cfg(test)]
mod tests;

/// Node identifier in the shared node store
pub type NodeId = usize;

/// Variable identifier (index in the variable ordering)
pub type VarId = usize;

/// Terminal node for FALSE
pub const FALSE_NODE: NodeId = 0;

/// Terminal node for TRUE
pub const TRUE_NODE: NodeId = 1;

/// A cube: one value per variable index, `None` meaning don't-care
pub type Cube = Vec<Option<bool>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum BddNode {
    Terminal(bool),
    Decision {
        var: VarId,
        low: NodeId,  // false edge
        high: NodeId, // true edge
    },
}

impl BddNode {
    /// Ordering rank of a node's variable; terminals sort below everything
    fn var_rank(&self) -> VarId {
        match self {
            BddNode::Terminal(_) => VarId::MAX,
            BddNode::Decision { var, .. } => *var,
        }
    }
}

/// The node store and caches behind a manager handle
///
/// # Invariant: NodeId stability
///
/// `nodes` only grows (via `push`), never shrinks or reorders. Once a node is
/// created at an index it stays there for the manager's lifetime, so ids held
/// by [`Bdd`] handles never dangle.
#[derive(Debug)]
struct ManagerInner {
    /// All nodes, terminals pinned at indices 0 and 1
    nodes: Vec<BddNode>,
    /// Unique table: (var, low, high) -> NodeId for hash consing
    unique_table: HashMap<(VarId, NodeId, NodeId), NodeId>,
    /// One past the highest variable index allocated so far
    num_vars: usize,
    /// Memoized ITE results: (f, g, h) -> result
    ite_cache: HashMap<(NodeId, NodeId, NodeId), NodeId>,
    /// Memoized compose results: (f, replacement, var) -> result
    compose_cache: HashMap<(NodeId, NodeId, VarId), NodeId>,
    /// Memoized existential abstraction results: (f, var) -> result
    exists_cache: HashMap<(NodeId, VarId), NodeId>,
}

impl ManagerInner {
    fn new() -> Self {
        ManagerInner {
            nodes: vec![
                BddNode::Terminal(false), // FALSE_NODE = 0
                BddNode::Terminal(true),  // TRUE_NODE = 1
            ],
            unique_table: HashMap::new(),
            num_vars: 0,
            ite_cache: HashMap::new(),
            compose_cache: HashMap::new(),
            exists_cache: HashMap::new(),
        }
    }

    /// Get or create a decision node, applying the reduction rules
    fn make_node(&mut self, var: VarId, low: NodeId, high: NodeId) -> NodeId {
        // Redundant test elimination
        if low == high {
            return low;
        }

        let key = (var, low, high);
        if let Some(&existing) = self.unique_table.get(&key) {
            return existing;
        }

        let node_id = self.nodes.len();
        self.nodes.push(BddNode::Decision { var, low, high });
        self.unique_table.insert(key, node_id);
        node_id
    }

    /// The BDD for a bare variable, allocating the index on first use
    fn var_node(&mut self, var: VarId) -> NodeId {
        if var >= self.num_vars {
            self.num_vars = var + 1;
        }
        self.make_node(var, FALSE_NODE, TRUE_NODE)
    }

    /// Cofactors of a node with respect to `split_var`
    ///
    /// A node whose variable sits below `split_var` in the ordering is
    /// independent of it, so both cofactors are the node itself.
    fn cofactors(&self, id: NodeId, split_var: VarId) -> (NodeId, NodeId) {
        match self.nodes[id] {
            BddNode::Decision { var, low, high } if var == split_var => (low, high),
            _ => (id, id),
        }
    }

    /// If-then-else: the fundamental operation all others derive from
    fn ite(&mut self, f: NodeId, g: NodeId, h: NodeId) -> NodeId {
        // Terminal cases
        if f == TRUE_NODE {
            return g;
        }
        if f == FALSE_NODE {
            return h;
        }
        if g == TRUE_NODE && h == FALSE_NODE {
            return f;
        }
        if g == h {
            return g;
        }

        let cache_key = (f, g, h);
        if let Some(&result) = self.ite_cache.get(&cache_key) {
            return result;
        }

        // Shannon expansion on the topmost variable of the three operands
        let top_var = self.nodes[f]
            .var_rank()
            .min(self.nodes[g].var_rank())
            .min(self.nodes[h].var_rank());

        let (f_low, f_high) = self.cofactors(f, top_var);
        let (g_low, g_high) = self.cofactors(g, top_var);
        let (h_low, h_high) = self.cofactors(h, top_var);

        let low = self.ite(f_low, g_low, h_low);
        let high = self.ite(f_high, g_high, h_high);

        let result = self.make_node(top_var, low, high);
        self.ite_cache.insert(cache_key, result);
        result
    }

    /// Substitute `g` for variable `var` in `f`
    ///
    /// When `g` is a bare variable absent from `f`'s support this acts as a
    /// pure renaming, which is how the solver moves dictionary bits onto grid
    /// cells.
    fn compose(&mut self, f: NodeId, g: NodeId, var: VarId) -> NodeId {
        let f_var = self.nodes[f].var_rank();
        // Ordered BDD: below f's top variable only larger indices occur
        if f_var > var {
            return f;
        }

        let cache_key = (f, g, var);
        if let Some(&result) = self.compose_cache.get(&cache_key) {
            return result;
        }

        let (low, high) = match self.nodes[f] {
            BddNode::Decision { low, high, .. } => (low, high),
            BddNode::Terminal(_) => unreachable!("terminals rank below every variable"),
        };

        let result = if f_var == var {
            self.ite(g, high, low)
        } else {
            let new_low = self.compose(low, g, var);
            let new_high = self.compose(high, g, var);
            let branch = self.var_node(f_var);
            self.ite(branch, new_high, new_low)
        };

        self.compose_cache.insert(cache_key, result);
        result
    }

    /// Existentially abstract `var` out of `f`
    fn exist_abstract(&mut self, f: NodeId, var: VarId) -> NodeId {
        let f_var = self.nodes[f].var_rank();
        if f_var > var {
            return f;
        }

        let cache_key = (f, var);
        if let Some(&result) = self.exists_cache.get(&cache_key) {
            return result;
        }

        let (low, high) = match self.nodes[f] {
            BddNode::Decision { low, high, .. } => (low, high),
            BddNode::Terminal(_) => unreachable!("terminals rank below every variable"),
        };

        let result = if f_var == var {
            // or(low, high)
            self.ite(low, TRUE_NODE, high)
        } else {
            let new_low = self.exist_abstract(low, var);
            let new_high = self.exist_abstract(high, var);
            let branch = self.var_node(f_var);
            self.ite(branch, new_high, new_low)
        };

        self.exists_cache.insert(cache_key, result);
        result
    }
}

/// Shared BDD manager
///
/// All handles derived from one manager share its node store and caches.
/// The handle is cheap to clone; clones refer to the same manager.
#[derive(Debug, Clone)]
pub struct BddManager {
    inner: Arc<RwLock<ManagerInner>>,
}

impl BddManager {
    /// Create an empty manager holding only the two terminal nodes
    pub fn new() -> Self {
        BddManager {
            inner: Arc::new(RwLock::new(ManagerInner::new())),
        }
    }

    /// The BDD representing a constant
    pub fn constant(&self, value: bool) -> Bdd {
        Bdd {
            manager: self.clone(),
            root: if value { TRUE_NODE } else { FALSE_NODE },
        }
    }

    /// The BDD for variable `index`, allocating it on first use
    pub fn var(&self, index: VarId) -> Bdd {
        let root = self.inner.write().unwrap().var_node(index);
        Bdd {
            manager: self.clone(),
            root,
        }
    }

    /// One past the highest variable index allocated so far
    pub fn var_count(&self) -> usize {
        self.inner.read().unwrap().num_vars
    }

    /// Total number of unique nodes in the store, terminals included
    pub fn node_count(&self) -> usize {
        self.inner.read().unwrap().nodes.len()
    }

    fn same_manager(&self, other: &BddManager) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for BddManager {
    fn default() -> Self {
        BddManager::new()
    }
}

/// An owned handle to a Boolean function in a shared manager
///
/// Handles compare equal exactly when they denote the same function in the
/// same manager; canonicity makes this a root-pointer comparison.
#[derive(Debug, Clone)]
pub struct Bdd {
    manager: BddManager,
    root: NodeId,
}

impl Bdd {
    /// The manager this handle belongs to
    pub fn manager(&self) -> &BddManager {
        &self.manager
    }

    /// Check if this BDD is a terminal (constant)
    pub fn is_terminal(&self) -> bool {
        self.root == TRUE_NODE || self.root == FALSE_NODE
    }

    /// Check if this BDD represents TRUE
    pub fn is_true(&self) -> bool {
        self.root == TRUE_NODE
    }

    /// Check if this BDD represents FALSE (the empty language)
    pub fn is_false(&self) -> bool {
        self.root == FALSE_NODE
    }

    /// Logical AND: `ite(f, g, false)`
    pub fn and(&self, other: &Bdd) -> Bdd {
        debug_assert!(
            self.manager.same_manager(&other.manager),
            "BDD operands belong to different managers"
        );
        let root = self
            .manager
            .inner
            .write()
            .unwrap()
            .ite(self.root, other.root, FALSE_NODE);
        Bdd {
            manager: self.manager.clone(),
            root,
        }
    }

    /// Logical OR: `ite(f, true, g)`
    pub fn or(&self, other: &Bdd) -> Bdd {
        debug_assert!(
            self.manager.same_manager(&other.manager),
            "BDD operands belong to different managers"
        );
        let root = self
            .manager
            .inner
            .write()
            .unwrap()
            .ite(self.root, TRUE_NODE, other.root);
        Bdd {
            manager: self.manager.clone(),
            root,
        }
    }

    /// Logical NOT: `ite(f, false, true)`
    pub fn not(&self) -> Bdd {
        let root = self
            .manager
            .inner
            .write()
            .unwrap()
            .ite(self.root, FALSE_NODE, TRUE_NODE);
        Bdd {
            manager: self.manager.clone(),
            root,
        }
    }

    /// Substitute `replacement` for variable `var`
    ///
    /// With a `replacement` variable disjoint from this BDD's support the
    /// substitution is a renaming of `var`.
    pub fn compose(&self, replacement: &Bdd, var: VarId) -> Bdd {
        debug_assert!(
            self.manager.same_manager(&replacement.manager),
            "BDD operands belong to different managers"
        );
        let root = self
            .manager
            .inner
            .write()
            .unwrap()
            .compose(self.root, replacement.root, var);
        Bdd {
            manager: self.manager.clone(),
            root,
        }
    }

    /// Existentially abstract variable `var`: `f[var:=0] | f[var:=1]`
    pub fn exist_abstract(&self, var: VarId) -> Bdd {
        let root = self
            .manager
            .inner
            .write()
            .unwrap()
            .exist_abstract(self.root, var);
        Bdd {
            manager: self.manager.clone(),
            root,
        }
    }

    /// Number of nodes reachable from this handle's root, terminals included
    pub fn node_count(&self) -> usize {
        let inner = self.manager.inner.read().unwrap();
        let mut visited = vec![false; inner.nodes.len()];
        let mut stack = vec![self.root];
        let mut count = 0;
        while let Some(id) = stack.pop() {
            if visited[id] {
                continue;
            }
            visited[id] = true;
            count += 1;
            if let BddNode::Decision { low, high, .. } = inner.nodes[id] {
                stack.push(low);
                stack.push(high);
            }
        }
        count
    }

    /// The variables this function non-trivially depends on, ascending
    pub fn support(&self) -> Vec<VarId> {
        let inner = self.manager.inner.read().unwrap();
        let mut visited = vec![false; inner.nodes.len()];
        let mut vars = std::collections::BTreeSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if visited[id] {
                continue;
            }
            visited[id] = true;
            if let BddNode::Decision { var, low, high } = inner.nodes[id] {
                vars.insert(var);
                stack.push(low);
                stack.push(high);
            }
        }
        vars.into_iter().collect()
    }

    /// Extract the satisfying cubes of this function
    ///
    /// Each cube assigns every allocated variable index a value or don't-care
    /// and corresponds to one path from the root to the TRUE terminal.
    pub fn cubes(&self) -> Vec<Cube> {
        let inner = self.manager.inner.read().unwrap();
        let width = inner.num_vars;
        let mut results = Vec::new();
        let mut path = Vec::new();
        Self::collect_cubes(&inner, self.root, width, &mut path, &mut results);
        results
    }

    fn collect_cubes(
        inner: &ManagerInner,
        node: NodeId,
        width: usize,
        path: &mut Vec<(VarId, bool)>,
        results: &mut Vec<Cube>,
    ) {
        match inner.nodes[node] {
            BddNode::Terminal(false) => {}
            BddNode::Terminal(true) => {
                let mut cube = vec![None; width];
                for &(var, value) in path.iter() {
                    cube[var] = Some(value);
                }
                results.push(cube);
            }
            BddNode::Decision { var, low, high } => {
                path.push((var, false));
                Self::collect_cubes(inner, low, width, path, results);
                path.pop();

                path.push((var, true));
                Self::collect_cubes(inner, high, width, path, results);
                path.pop();
            }
        }
    }

    /// Dump this BDD in Graphviz DOT format
    ///
    /// Then-edges are solid, else-edges dashed; terminals are boxes.
    pub fn write_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let nodes = {
            let inner = self.manager.inner.read().unwrap();
            let mut visited = vec![false; inner.nodes.len()];
            let mut found = Vec::new();
            let mut stack = vec![self.root];
            while let Some(id) = stack.pop() {
                if visited[id] {
                    continue;
                }
                visited[id] = true;
                if let BddNode::Decision { var, low, high } = inner.nodes[id] {
                    found.push((id, var, low, high));
                    stack.push(low);
                    stack.push(high);
                }
            }
            found.sort_unstable();
            found
        };

        writeln!(writer, "digraph bdd {{")?;
        writeln!(writer, "  node [shape=circle];")?;
        writeln!(writer, "  n{} [label=\"0\", shape=box];", FALSE_NODE)?;
        writeln!(writer, "  n{} [label=\"1\", shape=box];", TRUE_NODE)?;
        for &(id, var, _, _) in &nodes {
            writeln!(writer, "  n{} [label=\"x{}\"];", id, var)?;
        }
        for &(id, _, low, high) in &nodes {
            writeln!(writer, "  n{} -> n{} [style=solid];", id, high)?;
            writeln!(writer, "  n{} -> n{} [style=dashed];", id, low)?;
        }
        writeln!(writer, "  root -> n{} [style=solid];", self.root)?;
        writeln!(writer, "  root [shape=plaintext, label=\"f\"];")?;
        writeln!(writer, "}}")?;
        Ok(())
    }
}

impl PartialEq for Bdd {
    fn eq(&self, other: &Self) -> bool {
        // Canonicity: same manager and same root node means same function
        self.manager.same_manager(&other.manager) && self.root == other.root
    }
}

impl Eq for Bdd {}
