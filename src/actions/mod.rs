mod depends;
mod list;
mod search;
mod show;

use crate::{
    db::{Package, PackageDatabase},
    types::config::{Opts, SubCmd},
};

use anyhow::{bail, Result};
use console::style;
use std::io::Write;

pub fn fullfill_command(opts: &Opts, db: &PackageDatabase) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &opts.subcmd {
        SubCmd::Depends(req) => {
            let pkg = get_installed(db, &req.name)?;
            depends::show_depends(&mut out, pkg, &req.field, req.inline)?;
        }
        SubCmd::List => {
            list::show_table(&mut out, db)?;
        }
        SubCmd::Show(req) => {
            let pkg = get_installed(db, &req.name)?;
            show::show_pkg(&mut out, pkg)?;
        }
        SubCmd::Search(req) => {
            search::search_db(&mut out, db, &req.keyword)?;
        }
    }
    out.flush()?;

    Ok(())
}

fn get_installed<'a>(db: &'a PackageDatabase, name: &str) -> Result<&'a Package> {
    match db.get(name) {
        Some(pkg) => Ok(pkg),
        None => match db.closest(name) {
            Some(suggestion) => bail!(
                "Package {} is not installed. Did you mean {}?",
                name,
                style(suggestion).bold()
            ),
            None => bail!("Package {} is not installed", name),
        },
    }
}
