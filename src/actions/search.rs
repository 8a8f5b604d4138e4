use crate::db::PackageDatabase;

use anyhow::Result;
use console::style;
use std::io::Write;

pub fn search_db(out: &mut impl Write, db: &PackageDatabase, keyword: &str) -> Result<()> {
    let pkgs = db.search(keyword);
    if pkgs.is_empty() {
        crate::info!("No installed package matches {}", style(keyword).bold());
        return Ok(());
    }

    for pkg in pkgs {
        // Construct pkg info line
        let mut pkg_info_line = style(pkg.name().unwrap_or_default()).bold().to_string();
        if let Some(version) = pkg.version() {
            pkg_info_line.push(' ');
            pkg_info_line.push_str(&style(version).green().to_string());
        }
        writeln!(out, "{}", pkg_info_line)?;
        // Only the synopsis line of the description
        if let Some(desc) = pkg.text("Description") {
            writeln!(out, "    {}", desc.lines().next().unwrap_or_default())?;
        }
    }

    Ok(())
}
