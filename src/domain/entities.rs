//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity attributes shared by every entity, leaf or composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Display name (not unique)
    pub name: String,
    /// Free-form grouping label
    pub department: String,
    /// Role label
    pub title: String,
}

impl Employee {
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            title: title.into(),
        }
    }
}

/// One-line description shared by every textual rendering of an entity.
fn write_description(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    department: &str,
    title: &str,
) -> fmt::Result {
    write!(f, "{} belongs to {}, title: {}", name, department, title)
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_description(f, &self.name, &self.department, &self.title)
    }
}

/// Variant tag of an entity, without its child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Leaf,
    Composite,
}

/// One line of a `describe` traversal.
///
/// `depth` is the distance from the described entity, which itself is at 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescribeRecord {
    pub depth: usize,
    pub name: String,
    pub department: String,
    pub title: String,
}

impl DescribeRecord {
    pub(crate) fn new(depth: usize, employee: &Employee) -> Self {
        Self {
            depth,
            name: employee.name.clone(),
            department: employee.department.clone(),
            title: employee.title.clone(),
        }
    }
}

impl fmt::Display for DescribeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_description(f, &self.name, &self.department, &self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_employee_when_displayed_then_shows_all_attributes() {
        let e = Employee::new("John", "Audit Committee", "Intern");
        assert_eq!(
            e.to_string(),
            "John belongs to Audit Committee, title: Intern"
        );
    }

    #[test]
    fn given_record_when_displayed_then_matches_employee_display() {
        let e = Employee::new("Tom", "Board of Directors", "CEO");
        let record = DescribeRecord::new(2, &e);
        assert_eq!(record.to_string(), e.to_string());
        assert_eq!(record.depth, 2);
    }
}
