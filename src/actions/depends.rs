use crate::{db::Package, types::display_list};

use anyhow::{Context, Result};
use std::io::Write;

/// Print one dependency group per line, alternatives joined by `|`.
/// With `inline` the whole list goes on one line like in a control file.
pub fn show_depends(out: &mut impl Write, pkg: &Package, field: &str, inline: bool) -> Result<()> {
    let name = pkg.name().unwrap_or_default();
    let groups = pkg
        .relations(field)
        .context(format!("Failed to parse {} of {}", field, name))?;

    if inline {
        if !groups.is_empty() {
            writeln!(out, "{}", display_list(&groups))?;
        }
        return Ok(());
    }
    for group in groups {
        writeln!(out, "{}", group)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn render(pkg: &Package, field: &str, inline: bool) -> String {
        let mut out = Vec::new();
        show_depends(&mut out, pkg, field, inline).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn print_groups() {
        let pkg = Package::read_from(
            &mut "Package: a\nDepends: b (>= 1.0) | c, d\nRecommends: e\n".as_bytes(),
        )
        .unwrap();
        assert_eq!(render(&pkg, "Depends", false), "b (>= 1.0) | c\nd\n");
        assert_eq!(render(&pkg, "Depends", true), "b (>= 1.0) | c, d\n");
        assert_eq!(render(&pkg, "Recommends", false), "e\n");
        assert_eq!(render(&pkg, "Suggests", false), "");
        assert_eq!(render(&pkg, "Suggests", true), "");
    }

    #[test]
    fn malformed_depends() {
        let pkg = Package::read_from(&mut "Package: a\nDepends: b,, c\n".as_bytes()).unwrap();
        let err = show_depends(&mut Vec::<u8>::new(), &pkg, "Depends", false).unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse Depends of a");
        assert!(err.chain().nth(1).unwrap().to_string().contains("empty dependency group"));
    }
}
