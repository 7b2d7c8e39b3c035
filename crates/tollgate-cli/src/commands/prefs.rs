use anyhow::{Context, Result};
use tabled::{Table, Tabled};
use tollgate_core::is_ignored;
use tollgate_prefs::PrefStore;

#[derive(Tabled)]
struct SettingRow {
    #[tabled(rename = "Setting")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Print the resolved preference file as a table.
pub fn show(store: &PrefStore) -> Result<()> {
    let prefs = store
        .load()
        .with_context(|| format!("cannot load preferences from {}", store.path().display()))?;

    let mut blocked: Vec<&str> = prefs.blocked_packages.iter().map(String::as_str).collect();
    blocked.sort_unstable();
    let tasks: Vec<&str> = prefs.tasks.iter().map(String::as_str).collect();

    let rows = vec![
        SettingRow {
            name: "File",
            value: store.path().display().to_string(),
        },
        SettingRow {
            name: "Duration",
            value: format!("{}s", prefs.duration_secs),
        },
        SettingRow {
            name: "Blocked packages",
            value: join_or_dash(&blocked),
        },
        SettingRow {
            name: "Tasks",
            value: join_or_dash(&tasks),
        },
    ];

    println!("{}", Table::new(rows));
    Ok(())
}

/// Explain what a foreground switch to `package` would do.
pub fn check(store: &PrefStore, package: &str, self_package: &str) -> Result<()> {
    let prefs = store.load_or_default();
    if is_ignored(package, self_package) {
        println!("{package}: ignored (never blocked)");
    } else if prefs.blocked_packages.contains(package) {
        println!(
            "{package}: blocked ({}s wait, {} task(s))",
            prefs.duration_secs,
            prefs.tasks.len()
        );
    } else {
        println!("{package}: allowed");
    }
    Ok(())
}

fn join_or_dash(items: &[&str]) -> String {
    if items.is_empty() {
        String::from("-")
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_or_dash_handles_empty_lists() {
        assert_eq!(join_or_dash(&[]), "-");
        assert_eq!(join_or_dash(&["a", "b"]), "a, b");
    }
}
