use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::entities::{DescribeRecord, Employee, EntityKind};
use crate::domain::error::{DomainError, DomainResult};

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to an entity stored in an [`OrgTree`].
///
/// Carries the identity of the owning tree, so a handle from another tree
/// is rejected instead of aliasing an unrelated slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    tree: u64,
    index: Index,
}

#[derive(Debug)]
enum NodeKind {
    Leaf,
    /// Child handles in insertion order; duplicates allowed
    Composite { children: Vec<Index> },
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
struct OrgNode {
    employee: Employee,
    kind: NodeKind,
    /// Creation sequence, stable across slot reuse
    seq: u64,
}

/// Arena-based org-unit tree.
///
/// Composites hold handles rather than owning their subordinates, so one
/// entity may sit under several composites and survives being detached.
/// The structure is kept acyclic by an ancestor check on every attach.
#[derive(Debug)]
pub struct OrgTree {
    id: u64,
    arena: Arena<OrgNode>,
    next_seq: u64,
}

impl Default for OrgTree {
    fn default() -> Self {
        Self::new()
    }
}

impl OrgTree {
    pub fn new() -> Self {
        Self {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            arena: Arena::new(),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn add_leaf(&mut self, employee: Employee) -> EntityId {
        self.insert(employee, NodeKind::Leaf)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn add_composite(&mut self, employee: Employee) -> EntityId {
        self.insert(
            employee,
            NodeKind::Composite {
                children: Vec::new(),
            },
        )
    }

    fn insert(&mut self, employee: Employee, kind: NodeKind) -> EntityId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let index = self.arena.insert(OrgNode {
            employee,
            kind,
            seq,
        });
        self.handle(index)
    }

    fn handle(&self, index: Index) -> EntityId {
        EntityId {
            tree: self.id,
            index,
        }
    }

    fn resolve(&self, id: EntityId) -> DomainResult<(Index, &OrgNode)> {
        if id.tree != self.id {
            return Err(DomainError::InvalidReference);
        }
        self.arena
            .get(id.index)
            .map(|node| (id.index, node))
            .ok_or(DomainError::InvalidReference)
    }

    pub fn employee(&self, id: EntityId) -> DomainResult<&Employee> {
        Ok(&self.resolve(id)?.1.employee)
    }

    /// Mutable access to the identity attributes (rename, move department, retitle).
    pub fn employee_mut(&mut self, id: EntityId) -> DomainResult<&mut Employee> {
        self.resolve(id)?;
        self.arena
            .get_mut(id.index)
            .map(|node| &mut node.employee)
            .ok_or(DomainError::InvalidReference)
    }

    pub fn kind(&self, id: EntityId) -> DomainResult<EntityKind> {
        Ok(match self.resolve(id)?.1.kind {
            NodeKind::Leaf => EntityKind::Leaf,
            NodeKind::Composite { .. } => EntityKind::Composite,
        })
    }

    /// Direct children in insertion order; empty for a leaf.
    pub fn children(&self, id: EntityId) -> DomainResult<Vec<EntityId>> {
        let (_, node) = self.resolve(id)?;
        Ok(match &node.kind {
            NodeKind::Leaf => Vec::new(),
            NodeKind::Composite { children } => {
                children.iter().map(|&idx| self.handle(idx)).collect()
            }
        })
    }

    /// Appends `entity` to the end of `composite`'s children.
    ///
    /// Duplicates are accepted. Attaching an entity under itself or under one
    /// of its own descendants fails with [`DomainError::CycleDetected`].
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, composite: EntityId, entity: EntityId) -> DomainResult<()> {
        let (_, parent) = self.resolve(composite)?;
        if matches!(parent.kind, NodeKind::Leaf) {
            return Err(DomainError::NotComposite(parent.employee.name.clone()));
        }
        let (_, child) = self.resolve(entity)?;

        if self.is_ancestor_or_self(entity, composite)? {
            return Err(DomainError::CycleDetected {
                parent: parent.employee.name.clone(),
                child: child.employee.name.clone(),
            });
        }

        if let Some(OrgNode {
            kind: NodeKind::Composite { children },
            employee,
            ..
        }) = self.arena.get_mut(composite.index)
        {
            children.push(entity.index);
            debug!("attached child to '{}' ({} children)", employee.name, children.len());
        }
        Ok(())
    }

    /// Detaches the first occurrence of `entity` from `composite`'s direct children.
    ///
    /// Returns `false` when `entity` is not a direct child. The entity itself
    /// is untouched and stays describable.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_child(&mut self, composite: EntityId, entity: EntityId) -> DomainResult<bool> {
        let (_, parent) = self.resolve(composite)?;
        if matches!(parent.kind, NodeKind::Leaf) {
            return Err(DomainError::NotComposite(parent.employee.name.clone()));
        }
        self.resolve(entity)?;

        let Some(OrgNode {
            kind: NodeKind::Composite { children },
            ..
        }) = self.arena.get_mut(composite.index)
        else {
            return Ok(false);
        };
        match children.iter().position(|&idx| idx == entity.index) {
            Some(pos) => {
                children.remove(pos);
                debug!("detached child at position {}", pos);
                Ok(true)
            }
            None => {
                debug!("entity is not a direct child, nothing to detach");
                Ok(false)
            }
        }
    }

    /// Whether `node` is reachable from `ancestor` through child links.
    /// An entity counts as its own ancestor.
    #[instrument(level = "trace", skip(self))]
    pub fn is_ancestor_or_self(&self, ancestor: EntityId, node: EntityId) -> DomainResult<bool> {
        let (start, _) = self.resolve(ancestor)?;
        let (target, _) = self.resolve(node)?;

        let mut visited = HashSet::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if current == target {
                return Ok(true);
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(OrgNode {
                kind: NodeKind::Composite { children },
                ..
            }) = self.arena.get(current)
            {
                stack.extend(children.iter().copied());
            }
        }
        Ok(false)
    }

    /// Pre-order dump of `id` and, for a composite, all of its descendants.
    #[instrument(level = "debug", skip(self))]
    pub fn describe(&self, id: EntityId) -> DomainResult<Vec<DescribeRecord>> {
        Ok(self.describe_iter(id)?.collect())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn describe_iter(&self, id: EntityId) -> DomainResult<DescribeIter<'_>> {
        let (index, _) = self.resolve(id)?;
        Ok(DescribeIter {
            tree: self,
            stack: vec![(index, 0)],
        })
    }

    /// Number of levels in the subtree rooted at `id`; a lone entity has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, id: EntityId) -> DomainResult<usize> {
        let (index, _) = self.resolve(id)?;
        Ok(self.calculate_depth(index))
    }

    /// Post-order over an explicit stack; shared subtrees are measured once.
    fn calculate_depth(&self, root: Index) -> usize {
        let mut depths: HashMap<Index, usize> = HashMap::new();
        let mut stack = vec![(root, false)];

        while let Some((index, expanded)) = stack.pop() {
            if depths.contains_key(&index) {
                continue;
            }
            let depth = match self.arena.get(index).map(|node| &node.kind) {
                Some(NodeKind::Composite { children }) if !expanded => {
                    stack.push((index, true));
                    stack.extend(
                        children
                            .iter()
                            .filter(|&&child| !depths.contains_key(&child))
                            .map(|&child| (child, false)),
                    );
                    continue;
                }
                Some(NodeKind::Composite { children }) => {
                    1 + children
                        .iter()
                        .filter_map(|child| depths.get(child))
                        .max()
                        .copied()
                        .unwrap_or(0)
                }
                Some(NodeKind::Leaf) => 1,
                None => 0,
            };
            depths.insert(index, depth);
        }

        depths.get(&root).copied().unwrap_or(0)
    }

    /// Distinct leaf entities of the subtree, in pre-order of first visit.
    /// Empty composites are not leaves.
    #[instrument(level = "debug", skip(self))]
    pub fn leaves(&self, id: EntityId) -> DomainResult<Vec<EntityId>> {
        let (root, _) = self.resolve(id)?;
        let mut leaves = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![root];

        while let Some(index) = stack.pop() {
            if !visited.insert(index) {
                continue;
            }
            match self.arena.get(index).map(|node| &node.kind) {
                Some(NodeKind::Leaf) => leaves.push(self.handle(index)),
                // Push children in reverse order for left-to-right traversal
                Some(NodeKind::Composite { children }) => stack.extend(children.iter().rev()),
                None => {}
            }
        }
        Ok(leaves)
    }

    /// Composites currently holding `id`, one entry per occurrence, in creation order.
    pub fn parents(&self, id: EntityId) -> DomainResult<Vec<EntityId>> {
        let (target, _) = self.resolve(id)?;
        let mut holders: Vec<(u64, Index)> = Vec::new();
        for (idx, node) in self.arena.iter() {
            if let NodeKind::Composite { children } = &node.kind {
                let count = children.iter().filter(|&&c| c == target).count();
                holders.extend(std::iter::repeat((node.seq, idx)).take(count));
            }
        }
        holders.sort_by_key(|&(seq, _)| seq);
        Ok(holders.into_iter().map(|(_, idx)| self.handle(idx)).collect())
    }

    /// Entities attached to no composite, in creation order.
    pub fn roots(&self) -> Vec<EntityId> {
        let attached: HashSet<Index> = self
            .arena
            .iter()
            .filter_map(|(_, node)| match &node.kind {
                NodeKind::Composite { children } => Some(children.iter().copied()),
                NodeKind::Leaf => None,
            })
            .flatten()
            .collect();

        let mut roots: Vec<(u64, Index)> = self
            .arena
            .iter()
            .filter(|(idx, _)| !attached.contains(idx))
            .map(|(idx, node)| (node.seq, idx))
            .collect();
        roots.sort_by_key(|&(seq, _)| seq);
        roots.into_iter().map(|(_, idx)| self.handle(idx)).collect()
    }

    /// Reclaims an entity no composite refers to and returns its attributes.
    ///
    /// Children of a released composite stay in the tree; they only lose this parent.
    /// The released handle becomes an [`DomainError::InvalidReference`].
    #[instrument(level = "debug", skip(self))]
    pub fn release(&mut self, id: EntityId) -> DomainResult<Employee> {
        let parents = self.parents(id)?.len();
        if parents > 0 {
            let name = self.employee(id)?.name.clone();
            return Err(DomainError::StillAttached { name, parents });
        }
        self.arena
            .remove(id.index)
            .map(|node| node.employee)
            .ok_or(DomainError::InvalidReference)
    }
}

/// Lazy pre-order traversal yielding one [`DescribeRecord`] per visit.
pub struct DescribeIter<'a> {
    tree: &'a OrgTree,
    stack: Vec<(Index, usize)>,
}

impl<'a> Iterator for DescribeIter<'a> {
    type Item = DescribeRecord;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, depth)) = self.stack.pop() {
            if let Some(node) = self.tree.arena.get(index) {
                if let NodeKind::Composite { children } = &node.kind {
                    // Push children in reverse order for left-to-right traversal
                    for &child in children.iter().rev() {
                        self.stack.push((child, depth + 1));
                    }
                }
                return Some(DescribeRecord::new(depth, &node.employee));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(records: &[DescribeRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn given_composite_with_children_when_describing_then_visits_preorder() {
        let mut tree = OrgTree::new();
        let root = tree.add_composite(Employee::new("Tom", "Board", "CEO"));
        let mgr = tree.add_composite(Employee::new("Peter", "Audit", "Manager"));
        let a = tree.add_leaf(Employee::new("John", "Audit", "Intern"));
        let b = tree.add_leaf(Employee::new("Daniel", "Audit", "Lead"));
        let c = tree.add_leaf(Employee::new("Amy", "Board", "Assistant"));
        tree.add_child(mgr, a).unwrap();
        tree.add_child(mgr, b).unwrap();
        tree.add_child(root, mgr).unwrap();
        tree.add_child(root, c).unwrap();

        let records = tree.describe(root).unwrap();
        assert_eq!(names(&records), vec!["Tom", "Peter", "John", "Daniel", "Amy"]);
        let depths: Vec<usize> = records.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 2, 1]);
    }

    #[test]
    fn given_leaf_target_when_adding_child_then_not_composite() {
        let mut tree = OrgTree::new();
        let leaf = tree.add_leaf(Employee::new("John", "Audit", "Intern"));
        let other = tree.add_leaf(Employee::new("Amy", "Audit", "Intern"));
        let err = tree.add_child(leaf, other).unwrap_err();
        assert!(matches!(err, DomainError::NotComposite(name) if name == "John"));
    }

    #[test]
    fn given_slot_reuse_when_using_released_handle_then_invalid_reference() {
        let mut tree = OrgTree::new();
        let old = tree.add_leaf(Employee::new("John", "Audit", "Intern"));
        tree.release(old).unwrap();
        let _new = tree.add_leaf(Employee::new("Amy", "Audit", "Intern"));
        assert!(matches!(
            tree.employee(old),
            Err(DomainError::InvalidReference)
        ));
    }

    #[test]
    fn given_dag_when_describing_then_shared_child_appears_under_each_parent() {
        let mut tree = OrgTree::new();
        let root = tree.add_composite(Employee::new("Tom", "Board", "CEO"));
        let m1 = tree.add_composite(Employee::new("Peter", "Audit", "Manager"));
        let m2 = tree.add_composite(Employee::new("Alex", "Pay", "Manager"));
        let shared = tree.add_leaf(Employee::new("Allen", "Pay", "Lead"));
        tree.add_child(root, m1).unwrap();
        tree.add_child(root, m2).unwrap();
        tree.add_child(m1, shared).unwrap();
        tree.add_child(m2, shared).unwrap();

        let records = tree.describe(root).unwrap();
        assert_eq!(names(&records), vec!["Tom", "Peter", "Allen", "Alex", "Allen"]);
        assert_eq!(tree.parents(shared).unwrap(), vec![m1, m2]);
    }
}
