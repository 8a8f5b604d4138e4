//! Show installed packages in a table

use crate::db::PackageDatabase;

use anyhow::Result;
use console::style;
use std::io::Write;
use tabled::{Alignment, Column, Full, Modify, Style, Table, Tabled};

#[derive(Tabled)]
struct PkgRow {
    #[header("Name")]
    name: String,
    #[header("Version")]
    version: String,
    // Number of AND-groups in Depends
    #[header("Depends")]
    depends: String,
}

pub fn show_table(out: &mut impl Write, db: &PackageDatabase) -> Result<()> {
    let mut rows = Vec::with_capacity(db.len());
    for (name, pkg) in db.iter() {
        let depends = match pkg.requires() {
            Ok(groups) => groups.len().to_string(),
            Err(_) => style("malformed").red().to_string(),
        };
        rows.push(PkgRow {
            name: style(name).bold().to_string(),
            version: pkg.version().unwrap_or("-").to_owned(),
            depends,
        });
    }

    let table = Table::new(&rows)
        .with(Modify::new(Full).with(Alignment::left()))
        // Depends column should align right
        .with(Modify::new(Column(2..3)).with(Alignment::right()))
        .with(Modify::new(Full).with(|s: &str| format!(" {} ", s)))
        .with(Style::psql());
    writeln!(out, "{}", table)?;
    writeln!(
        out,
        "{} installed packages",
        style(db.len().to_string()).bold()
    )?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_lists_every_package() {
        let db = PackageDatabase::from_reader(
            &mut "Package: a\nStatus: install ok installed\nVersion: 1.0\nDepends: b, c\n\n\
                  Package: b\nStatus: install ok installed\n\n\
                  Package: c\nStatus: install ok installed\nDepends: ,\n"
                .as_bytes(),
        )
        .unwrap();
        let mut out = Vec::new();
        show_table(&mut out, &db).unwrap();
        let out = console::strip_ansi_codes(&String::from_utf8(out).unwrap()).to_string();

        assert!(out.contains("Name"));
        assert!(out.contains("1.0"));
        assert!(out.contains("malformed"));
        assert!(out.ends_with("3 installed packages\n"));
    }
}
