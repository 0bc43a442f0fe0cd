//! Scripted demo: a small company built, described, pruned and described again.
//!
//! The as-shipped attachment puts Maggie, Amy and Allen under Peter even though
//! they belong to Alex's committee. [`Attachment::Corrected`] files them under Alex.

use tracing::{info, instrument};

use crate::domain::{DescribeRecord, DomainResult, Employee, EntityId, OrgTree};

const AUDIT: &str = "Audit Committee";
const COMPENSATION: &str = "Compensation Committee";
const BOARD: &str = "Board of Directors";

/// Where the three compensation-committee employees are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attachment {
    /// Under manager1 (Peter), reproducing the historical demo output
    #[default]
    AsShipped,
    /// Under manager2 (Alex)
    Corrected,
}

/// Handles to every entity the demo creates.
#[derive(Debug, Clone, Copy)]
pub struct DemoHandles {
    pub e1: EntityId,
    pub e2: EntityId,
    pub e3: EntityId,
    pub e4: EntityId,
    pub e5: EntityId,
    pub manager1: EntityId,
    pub manager2: EntityId,
    pub ceo: EntityId,
}

/// A titled `describe` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub records: Vec<DescribeRecord>,
}

pub struct DemoScenario {
    pub tree: OrgTree,
    pub handles: DemoHandles,
}

impl DemoScenario {
    /// Builds the org tree: CEO over two managers and five employees.
    #[instrument(level = "debug")]
    pub fn build(attachment: Attachment) -> DomainResult<Self> {
        let mut tree = OrgTree::new();

        let e1 = tree.add_leaf(Employee::new("John", AUDIT, "Intern"));
        let e2 = tree.add_leaf(Employee::new("Daniel", AUDIT, "Team Lead"));
        let manager1 = tree.add_composite(Employee::new("Peter", AUDIT, "Manager"));
        tree.add_child(manager1, e1)?;
        tree.add_child(manager1, e2)?;

        let e3 = tree.add_leaf(Employee::new("Maggie", COMPENSATION, "Intern"));
        let e4 = tree.add_leaf(Employee::new("Amy", COMPENSATION, "Intern"));
        let e5 = tree.add_leaf(Employee::new("Allen", COMPENSATION, "Team Lead"));
        let manager2 = tree.add_composite(Employee::new("Alex", COMPENSATION, "Manager"));

        let compensation_head = match attachment {
            Attachment::AsShipped => manager1,
            Attachment::Corrected => manager2,
        };
        for e in [e3, e4, e5] {
            tree.add_child(compensation_head, e)?;
        }

        let ceo = tree.add_composite(Employee::new("Tom", BOARD, "CEO"));
        tree.add_child(ceo, manager1)?;
        tree.add_child(ceo, manager2)?;

        Ok(Self {
            tree,
            handles: DemoHandles {
                e1,
                e2,
                e3,
                e4,
                e5,
                manager1,
                manager2,
                ceo,
            },
        })
    }

    /// Runs the scripted sequence, mutating the tree along the way.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> DomainResult<Vec<Section>> {
        let h = self.handles;
        let mut sections = Vec::with_capacity(4);

        sections.push(Section {
            heading: "Full organization".to_string(),
            records: self.tree.describe(h.ceo)?,
        });

        let removed = self.tree.remove_child(h.ceo, h.manager1)?;
        info!("removed Peter from CEO: {}", removed);

        sections.push(Section {
            heading: "After removing Peter".to_string(),
            records: self.tree.describe(h.ceo)?,
        });
        sections.push(Section {
            heading: "Alex's subordinates only".to_string(),
            records: self.tree.describe(h.manager2)?,
        });
        sections.push(Section {
            heading: "John only".to_string(),
            records: self.tree.describe(h.e1)?,
        });

        Ok(sections)
    }
}

/// Builds and runs the demo in one step.
pub fn run_demo(attachment: Attachment) -> DomainResult<Vec<Section>> {
    DemoScenario::build(attachment)?.run()
}
