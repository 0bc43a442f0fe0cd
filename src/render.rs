//! Output formats for `describe` results.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::DescribeRecord;
use crate::tree_traits::TreeNodeConvert;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per entity, indented by depth
    #[default]
    Text,
    /// Box-drawing tree
    Tree,
    /// JSON array of records
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputFormat::Text => "text",
            OutputFormat::Tree => "tree",
            OutputFormat::Json => "json",
        };
        f.write_str(s)
    }
}

/// Render records in the requested format. `indent` only applies to text.
pub fn render(
    records: &[DescribeRecord],
    format: OutputFormat,
    indent: &str,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(records, indent)),
        OutputFormat::Tree => Ok(records.to_tree_string().to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(records),
    }
}

pub fn render_text(records: &[DescribeRecord], indent: &str) -> String {
    records
        .iter()
        .map(|r| format!("{}{}\n", indent.repeat(r.depth), r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Employee, OrgTree};
    use rstest::rstest;

    fn sample() -> Vec<DescribeRecord> {
        let mut tree = OrgTree::new();
        let mgr = tree.add_composite(Employee::new("Peter", "Audit", "Manager"));
        let e1 = tree.add_leaf(Employee::new("John", "Audit", "Intern"));
        tree.add_child(mgr, e1).unwrap();
        tree.describe(mgr).unwrap()
    }

    #[test]
    fn given_records_when_rendering_text_then_indents_by_depth() {
        let out = render_text(&sample(), "  ");
        assert_eq!(
            out,
            "Peter belongs to Audit, title: Manager\n  John belongs to Audit, title: Intern\n"
        );
    }

    #[test]
    fn given_records_when_rendering_json_then_carries_depth() {
        let out = render(&sample(), OutputFormat::Json, "\t").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["name"], "Peter");
        assert_eq!(value[1]["depth"], 1);
        assert_eq!(value[1]["title"], "Intern");
    }

    #[rstest]
    #[case(OutputFormat::Text, "text")]
    #[case(OutputFormat::Tree, "tree")]
    #[case(OutputFormat::Json, "json")]
    fn given_format_when_displayed_then_lowercase_name(
        #[case] format: OutputFormat,
        #[case] expected: &str,
    ) {
        assert_eq!(format.to_string(), expected);
    }
}
