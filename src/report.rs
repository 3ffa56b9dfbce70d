//! Console summary of a classified tree.
use colored::Colorize;

use crate::tree::{ClassifiedTree, Node, normalize};

const NAME_WIDTH: usize = 24;
const KIND_WIDTH: usize = 10;
const COUNT_WIDTH: usize = 24;
const FULL_WIDTH: usize = 70;


impl ClassifiedTree {
    /// Returns a colored table with one row per node:
    /// name (indented by depth), kind, per-class counts,
    /// and the share of the majority class.
    pub fn summary(&self) -> String {
        let classes = format!("{:?}", self.classes());
        let mut lines = vec![
            format!("{:=>FULL_WIDTH$}", ""),
            format!("{:^FULL_WIDTH$}", "OBLIQUE TREE".bold()),
            format!("{:->FULL_WIDTH$}", ""),
            format!(
                "+ {:<NAME_WIDTH$}\t{:>COUNT_WIDTH$}",
                "Classes".bold(),
                classes.bold().green(),
            ),
            format!(
                "+ {:<NAME_WIDTH$}\t{:>COUNT_WIDTH$}",
                "Leaves".bold(),
                self.root.leaves().to_string().bold().green(),
            ),
            format!(
                "+ {:<NAME_WIDTH$}\t{:>COUNT_WIDTH$}",
                "Depth".bold(),
                self.root.depth().to_string().bold().green(),
            ),
            format!("{:->FULL_WIDTH$}", ""),
            format!(
                "{:<NAME_WIDTH$}{:<KIND_WIDTH$}{:<COUNT_WIDTH$}{:>8}",
                "NODE".bold().red(),
                "KIND".bold().blue(),
                "COUNT".bold().yellow(),
                "PURITY".bold().cyan(),
            ),
        ];

        let mut stack = vec![(&self.root, 0_usize)];
        while let Some((node, depth)) = stack.pop() {
            lines.push(row(node, depth));
            let children = node.children().collect::<Vec<_>>();
            stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }

        lines.push(format!("{:=>FULL_WIDTH$}", ""));
        lines.join("\n")
    }
}


fn row(node: &Node, depth: usize) -> String {
    let name = format!("{:indent$}{}", "", node.name(), indent = 2 * depth);
    let (name, kind) = if node.is_leaf() {
        (name.yellow(), "leaf".yellow())
    } else {
        (name.green(), "decision".green())
    };

    let counts = node.total_count()
        .iter()
        .map(|&c| c as f64)
        .collect::<Vec<_>>();
    let purity = normalize(&counts)
        .and_then(|p| p.into_iter().reduce(f64::max))
        .map(|p| format!("{p:.3}"))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{:<NAME_WIDTH$}{:<KIND_WIDTH$}{:<COUNT_WIDTH$}{:>8}",
        name,
        kind,
        format!("{:?}", node.total_count()),
        purity,
    )
}
