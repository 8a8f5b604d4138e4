use crate::db::Package;

use anyhow::Result;
use std::io::Write;

/// Print the record in control file syntax
pub fn show_pkg(out: &mut impl Write, pkg: &Package) -> Result<()> {
    write!(out, "{}", pkg)?;
    Ok(())
}
