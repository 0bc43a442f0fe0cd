//! Org-chart builder: turns a declarative TOML chart into an [`OrgTree`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domain::arena::{EntityId, OrgTree};
use crate::domain::entities::{Employee, EntityKind};
use crate::domain::error::{DomainError, DomainResult};

/// One `[[entity]]` table of a chart document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntitySpec {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub title: String,
    pub kind: Option<EntityKind>,
    #[serde(default)]
    pub reports: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChartDocument {
    #[serde(default)]
    entity: Vec<EntitySpec>,
}

/// A built chart: the tree plus the document's keys mapped to handles.
#[derive(Debug)]
pub struct OrgChart {
    pub tree: OrgTree,
    pub keys: BTreeMap<String, EntityId>,
    /// Entities nobody reports to, in document order
    pub roots: Vec<EntityId>,
}

impl OrgChart {
    pub fn lookup(&self, key: &str) -> DomainResult<EntityId> {
        self.keys
            .get(key)
            .copied()
            .ok_or_else(|| DomainError::UnknownEntity(key.to_string()))
    }
}

/// Constructs org trees from chart documents.
#[derive(Debug, Default)]
pub struct OrgChartBuilder;

impl OrgChartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build_from_path(&self, path: &Path) -> DomainResult<OrgChart> {
        let content = std::fs::read_to_string(path).map_err(|source| DomainError::ChartRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.build_from_str(&content)
    }

    #[instrument(level = "debug", skip(self, content))]
    pub fn build_from_str(&self, content: &str) -> DomainResult<OrgChart> {
        let document: ChartDocument =
            toml::from_str(content).map_err(|e| DomainError::InvalidOrgChart {
                message: e.to_string(),
            })?;
        self.build(document.entity)
    }

    /// Build a tree from already-parsed entity specs.
    pub fn build(&self, specs: Vec<EntitySpec>) -> DomainResult<OrgChart> {
        let mut tree = OrgTree::new();
        let mut keys = BTreeMap::new();

        for spec in &specs {
            let kind = resolve_kind(spec)?;
            let employee = Employee::new(&spec.name, &spec.department, &spec.title);
            let id = match kind {
                EntityKind::Leaf => tree.add_leaf(employee),
                EntityKind::Composite => tree.add_composite(employee),
            };
            if keys.insert(spec.key.clone(), id).is_some() {
                return Err(DomainError::InvalidOrgChart {
                    message: format!("duplicate key '{}'", spec.key),
                });
            }
        }

        for spec in &specs {
            let parent = keys[&spec.key];
            for report in &spec.reports {
                let child = keys
                    .get(report)
                    .copied()
                    .ok_or_else(|| DomainError::UnknownEntity(report.clone()))?;
                tree.add_child(parent, child)?;
            }
        }

        let roots = tree.roots();
        debug!("built chart: {} entities, {} roots", tree.len(), roots.len());
        Ok(OrgChart { tree, keys, roots })
    }
}

fn resolve_kind(spec: &EntitySpec) -> DomainResult<EntityKind> {
    match (spec.kind, spec.reports.is_empty()) {
        (Some(EntityKind::Leaf), false) => Err(DomainError::InvalidOrgChart {
            message: format!("leaf '{}' cannot have reports", spec.key),
        }),
        (Some(kind), _) => Ok(kind),
        (None, true) => Ok(EntityKind::Leaf),
        (None, false) => Ok(EntityKind::Composite),
    }
}
