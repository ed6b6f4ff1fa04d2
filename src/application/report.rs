use std::fmt::Write as _;

use colored::Colorize;
use snaptree::{
    diff::{FilePair, FolderDiff},
    ext::PathExt,
    tree::{FileNode, FolderNode},
};

fn relative(file: &FileNode, root: &FolderNode) -> String {
    file.absolute_path()
        .relative_to(root.absolute_path())
        .display()
        .to_string()
}

fn section_header(output: &mut String, title: &str, count: usize) {
    let _ = writeln!(output, "{}", format!("{title} ({count})").bold());
}

/// Human-readable listing of every difference, followed by the summary counts.
/// Unchanged files are only counted.
pub fn render_report(diff: &FolderDiff<'_>, first: &FolderNode, second: &FolderNode) -> String {
    let mut output = String::new();
    let pair_lines = |pairs: &[FilePair<'_>], marker: &str| -> Vec<String> {
        pairs
            .iter()
            .map(|pair| {
                let first_path = relative(pair.first, first);
                let second_path = relative(pair.second, second);
                if first_path == second_path {
                    format!("  {marker} {first_path}")
                } else {
                    format!("  {marker} {first_path} -> {second_path}")
                }
            })
            .collect()
    };

    if !diff.modified().is_empty() {
        section_header(&mut output, "Modified", diff.modified().len());
        for line in pair_lines(diff.modified(), "*") {
            let _ = writeln!(output, "{}", line.yellow());
        }
    }
    if !diff.renamed().is_empty() {
        section_header(&mut output, "Renamed", diff.renamed().len());
        for line in pair_lines(diff.renamed(), "~") {
            let _ = writeln!(output, "{}", line.cyan());
        }
    }
    if !diff.extra_on_first().is_empty() {
        section_header(&mut output, "Only in first", diff.extra_on_first().len());
        for file in diff.extra_on_first() {
            let _ = writeln!(output, "{}", format!("  - {}", relative(file, first)).red());
        }
    }
    if !diff.extra_on_second().is_empty() {
        section_header(&mut output, "Only in second", diff.extra_on_second().len());
        for file in diff.extra_on_second() {
            let _ = writeln!(output, "{}", format!("  + {}", relative(file, second)).green());
        }
    }

    if diff.no_diffs() {
        let _ = writeln!(output, "{}", "No differences".green().bold());
    }
    let _ = writeln!(output, "{}", diff.stats());
    output
}
