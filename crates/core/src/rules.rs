//! Reply-rule tables loaded from TOML files.

use providers::canned::ReplyRule;
use std::fs;
use std::path::Path;

/// Load reply rules from every `.toml` file in `dir`, sorted by priority.
/// A missing directory yields an empty table.
pub fn load_reply_rules_from_dir(dir: &Path) -> anyhow::Result<Vec<ReplyRule>> {
    let mut rules = Vec::new();
    if !dir.exists() {
        return Ok(rules);
    }
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            let content = fs::read_to_string(entry.path())?;
            if entry.path().extension().and_then(|e| e.to_str()) == Some("toml") {
                let rule: ReplyRule = toml::from_str(&content)?;
                rules.push(rule);
            }
        }
    }
    rules.sort_by_key(|r| r.priority);
    Ok(rules)
}
