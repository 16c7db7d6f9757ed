//! Profiles command implementation.

use crate::{result::Result, scaffold::profile::Profile};

/// Print the built-in profiles and the layout each one creates.
pub fn execute() -> Result<()> {
    for line in render() {
        println!("{line}");
    }

    Ok(())
}

fn render() -> Vec<String> {
    let mut lines = Vec::new();

    for profile in Profile::all() {
        lines.push(format!("{:9} {}", profile.name(), profile.description()));

        for dir in profile.dirs("<package>") {
            lines.push(format!("          {dir}/"));
        }

        lines.push(String::new());
    }

    lines.pop();
    lines
}
