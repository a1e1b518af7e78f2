//! Output formatting for the CLI.

use crate::cli::TreeFormat;
use crate::error::Result;
use colored::*;
use sigclust_cluster::LabeledTree;
use sigclust_domain::ProjectSummary;
use sigclust_engine::{AggregationReport, SkipReason};

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format a clustering tree.
    pub fn format_tree(&self, tree: &LabeledTree, format: TreeFormat) -> Result<String> {
        match format {
            TreeFormat::Json => Ok(serde_json::to_string_pretty(tree)?),
            TreeFormat::Tree => Ok(self.render_tree(tree)),
        }
    }

    /// Render a tree with box-drawing connectors, one node per line.
    ///
    /// Iterative, so very deep trees are fine.
    fn render_tree(&self, tree: &LabeledTree) -> String {
        let mut lines = vec![self.colorize(&tree.name, "cyan")];
        let mut stack: Vec<(&LabeledTree, String, bool)> = Vec::new();
        push_children(&mut stack, tree, "");

        while let Some((node, prefix, last)) = stack.pop() {
            let connector = if last { "└── " } else { "├── " };
            let name = if node.is_leaf() {
                self.colorize(&node.name, "green")
            } else {
                node.name.clone()
            };
            lines.push(format!("{}{}{}", prefix, connector, name));

            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            push_children(&mut stack, node, &child_prefix);
        }

        lines.join("\n")
    }

    /// Format the project listing.
    pub fn format_projects(&self, projects: &[ProjectSummary]) -> String {
        if projects.is_empty() {
            return self.colorize("No projects found.", "yellow");
        }

        projects
            .iter()
            .map(|p| {
                if p.has_counts {
                    p.id.to_string()
                } else {
                    format!("{} {}", p.id, self.colorize("(no counts)", "yellow"))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the aggregation report.
    pub fn format_report(&self, report: &AggregationReport) -> String {
        let mut lines = vec![self.info(&format!(
            "{} samples from {}/{} projects",
            report.total_rows,
            report.contributing_projects(),
            report.projects.len()
        ))];

        for (project, reason) in report.skipped_projects() {
            let detail = match reason {
                SkipReason::NoCountData => "no count data".to_string(),
                SkipReason::NoCompleteSamples { dropped } => {
                    format!("no complete samples ({} dropped)", dropped)
                }
                SkipReason::SourceFailure(msg) => format!("read failed: {}", msg),
                SkipReason::DecompositionFailure(msg) => format!("decomposition failed: {}", msg),
            };
            lines.push(self.warning(&format!("Skipped {}: {}", project, detail)));
        }

        if !report.duplicate_samples.is_empty() {
            let names: Vec<&str> = report.duplicate_samples.iter().map(|s| s.as_str()).collect();
            lines.push(self.warning(&format!("Duplicate samples: {}", names.join(", "))));
        }

        lines.join("\n")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn push_children<'a>(
    stack: &mut Vec<(&'a LabeledTree, String, bool)>,
    node: &'a LabeledTree,
    prefix: &str,
) {
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate().rev() {
        stack.push((child, prefix.to_string(), i + 1 == count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigclust_domain::ProjectId;

    fn create_test_tree() -> LabeledTree {
        LabeledTree {
            name: "root".to_string(),
            children: vec![LabeledTree {
                name: "A1-A2-B1".to_string(),
                children: vec![
                    LabeledTree::leaf("A1"),
                    LabeledTree {
                        name: "A2-B1".to_string(),
                        children: vec![LabeledTree::leaf("A2"), LabeledTree::leaf("B1")],
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(false);
        let output = formatter
            .format_tree(&create_test_tree(), TreeFormat::Json)
            .unwrap();
        let parsed: LabeledTree = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, create_test_tree());
    }

    #[test]
    fn test_tree_format() {
        let formatter = Formatter::new(false);
        let output = formatter
            .format_tree(&create_test_tree(), TreeFormat::Tree)
            .unwrap();
        let expected = "root\n\
                        └── A1-A2-B1\n\
                        \x20   ├── A1\n\
                        \x20   └── A2-B1\n\
                        \x20       ├── A2\n\
                        \x20       └── B1";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_projects_format() {
        let formatter = Formatter::new(false);
        let projects = vec![
            ProjectSummary {
                id: ProjectId::from("PROJ-A"),
                has_counts: true,
            },
            ProjectSummary {
                id: ProjectId::from("PROJ-B"),
                has_counts: false,
            },
        ];
        assert_eq!(
            formatter.format_projects(&projects),
            "PROJ-A\nPROJ-B (no counts)"
        );
        assert_eq!(formatter.format_projects(&[]), "No projects found.");
    }

    #[test]
    fn test_report_format() {
        let formatter = Formatter::new(false);
        let report = AggregationReport::default();
        assert_eq!(formatter.format_report(&report), "ℹ 0 samples from 0/0 projects");
    }
}
