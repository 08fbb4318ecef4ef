//! Text rendering of source trees and planned destination trees.

use std::path::Path;

use crate::rebuild::RebuildPlan;
use crate::tree::SourceTree;

const DIR_ICON: &str = "📁";
const FILE_ICON: &str = "🗋";
const ROOT_ICON: &str = "🖴";

fn indent(depth: usize) -> String {
    " ".repeat(2 * depth)
}

/// Render an enumerated tree, two spaces of indent per level
pub fn render_tree(tree: &SourceTree) -> String {
    let mut lines = vec![format!("{} {}", DIR_ICON, tree.root_name())];
    for entry in &tree.entries {
        let icon = if entry.is_dir { DIR_ICON } else { FILE_ICON };
        lines.push(format!("{}{} {}", indent(entry.depth()), icon, entry.name));
    }
    lines.join("\n")
}

/// Render the destination tree a plan would produce, without touching the disk
pub fn render_plan(plan: &RebuildPlan) -> String {
    let mut lines = vec![format!("{} {}", ROOT_ICON, plan.destination_root.display())];
    for path in plan.path_map.paths() {
        lines.push(format!("{}{}", indent(path.components().count()), file_name(path)));
    }
    lines.join("\n")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
