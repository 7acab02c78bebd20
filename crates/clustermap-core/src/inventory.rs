//! Ansible inventory file format

use crate::ClustermapResult;
use std::path::Path;

/// Section header written as the first line of every inventory
pub const INVENTORY_HEADER: &str = "[slurm_nodes]";

/// Format an inventory: the header, then one newline-terminated host per line
pub fn format_inventory<S: AsRef<str>>(hosts: &[S]) -> String {
    let mut out = String::with_capacity(
        INVENTORY_HEADER.len() + 1 + hosts.iter().map(|h| h.as_ref().len() + 1).sum::<usize>(),
    );
    out.push_str(INVENTORY_HEADER);
    out.push('\n');
    for host in hosts {
        out.push_str(host.as_ref());
        out.push('\n');
    }
    out
}

/// Write an inventory file, replacing any existing file at `path`
pub fn write_inventory_file<S: AsRef<str>>(path: &Path, hosts: &[S]) -> ClustermapResult<()> {
    std::fs::write(path, format_inventory(hosts))?;
    Ok(())
}

/// Extract host lines from inventory text.
///
/// Section headers (lines starting with `[`) are skipped; every other line
/// is trimmed and kept.
pub fn parse_known_nodes(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.starts_with('['))
        .map(|line| line.trim().to_string())
        .collect()
}

/// Read the hosts listed in an inventory file
pub fn read_known_nodes(path: &Path) -> ClustermapResult<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_known_nodes(&content))
}
