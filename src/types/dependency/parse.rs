use super::{DependencyAlternatives, DependencySpec, VersionOp};
use crate::error::StatusDbError;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, space0},
    combinator::{opt, value},
    sequence::{delimited, pair, preceded, separated_pair},
    IResult,
};

// Names and versions are opaque, only the list syntax is reserved
fn is_pkgname_char(c: char) -> bool {
    !c.is_whitespace() && !"(),|".contains(c)
}

fn is_version_char(c: char) -> bool {
    !c.is_whitespace() && c != ')'
}

// parser combinators
fn package_name(i: &str) -> IResult<&str, &str> {
    take_while1(is_pkgname_char)(i)
}

fn version_op(i: &str) -> IResult<&str, VersionOp> {
    // Longer literals first, otherwise `<` would eat the head of `<<`
    alt((
        value(VersionOp::StrictlyEarlier, tag("<<")),
        value(VersionOp::EarlierOrEqual, tag("<=")),
        value(VersionOp::StrictlyLater, tag(">>")),
        value(VersionOp::LaterOrEqual, tag(">=")),
        value(VersionOp::Exactly, tag("=")),
        value(VersionOp::Earlier, tag("<")),
        value(VersionOp::Later, tag(">")),
    ))(i)
}

fn version(i: &str) -> IResult<&str, &str> {
    take_while1(is_version_char)(i)
}

fn version_relation(i: &str) -> IResult<&str, (VersionOp, &str)> {
    delimited(
        pair(char('('), space0),
        separated_pair(version_op, space0, version),
        pair(space0, char(')')),
    )(i)
}

/// Parse one dependency token like `libapr1 (>= 1.2.7)`
pub fn parse_dependency(token: &str) -> Result<DependencySpec, StatusDbError> {
    let i = token.trim();
    if i.is_empty() {
        return Err(StatusDbError::malformed_dep(token, "empty dependency"));
    }
    let (i, name) = package_name(i)
        .map_err(|_| StatusDbError::malformed_dep(token, "missing package name"))?;
    let (i, relation) = opt(preceded(space0, version_relation))(i)
        .map_err(|_| StatusDbError::malformed_dep(token, "malformed version relation"))?;

    if !i.is_empty() {
        let reason = if i.trim_start().starts_with('(') {
            "malformed version relation".to_owned()
        } else {
            format!("unexpected trailing input \"{}\"", i)
        };
        return Err(StatusDbError::malformed_dep(token, reason));
    }

    let res = match relation {
        Some((op, ver)) => DependencySpec::with_relation(name, op, ver),
        None => DependencySpec::new(name),
    };
    Ok(res)
}

fn parse_alternatives(group: &str) -> Result<DependencyAlternatives, StatusDbError> {
    let mut specs = Vec::new();
    for token in group.split('|') {
        if token.trim().is_empty() {
            return Err(StatusDbError::malformed_dep(group.trim(), "empty alternative"));
        }
        specs.push(parse_dependency(token)?);
    }
    Ok(DependencyAlternatives::new(specs))
}

/// Parse the value of a relationship field such as `Depends`.
///
/// A missing field means no dependencies. Empty groups or alternatives
/// inside a non-empty field are rejected instead of being dropped.
pub fn parse_dependency_list(
    field: Option<&str>,
) -> Result<Vec<DependencyAlternatives>, StatusDbError> {
    let s = match field {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Ok(Vec::new()),
    };

    let mut res = Vec::new();
    for group in s.split(',') {
        if group.trim().is_empty() {
            return Err(StatusDbError::malformed_dep(s.trim(), "empty dependency group"));
        }
        res.push(parse_alternatives(group)?);
    }

    Ok(res)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parsers() {
        assert_eq!(version_op(">>"), Ok(("", VersionOp::StrictlyLater)));
        assert_eq!(version_op("<="), Ok(("", VersionOp::EarlierOrEqual)));
        assert_eq!(version_op("< 1"), Ok((" 1", VersionOp::Earlier)));
        assert_eq!(version("2:1.1.0~rc.1)"), Ok((")", "2:1.1.0~rc.1")));
        assert_eq!(package_name("sqlite-ass"), Ok(("", "sqlite-ass")));
        assert_eq!(package_name("sqlite_ass"), Ok(("", "sqlite_ass")));
        assert_eq!(package_name("perl:any"), Ok(("", "perl:any")));
        assert_eq!(package_name("libfoo(>= 1)"), Ok(("(>= 1)", "libfoo")));
        assert_eq!(package_name("a|b"), Ok(("|b", "a")));
        assert_eq!(version("1.0+really@x) "), Ok((") ", "1.0+really@x")));
        assert!(package_name("(>= 1.0)").is_err());
        assert_eq!(
            version_relation("(>= 1.9.1)"),
            Ok(("", (VersionOp::LaterOrEqual, "1.9.1")))
        );
        assert_eq!(
            version_relation("(>=1.9.1)"),
            Ok(("", (VersionOp::LaterOrEqual, "1.9.1")))
        );
    }

    #[test]
    fn parse_single_dependency() {
        let spec = parse_dependency("libapr1 (>= 1.2.7)").unwrap();
        assert_eq!(spec.name(), "libapr1");
        assert_eq!(spec.op(), Some(VersionOp::LaterOrEqual));
        assert_eq!(spec.version(), Some("1.2.7"));

        let spec = parse_dependency("libc6").unwrap();
        assert_eq!(spec.name(), "libc6");
        assert_eq!(spec.op(), None);
        assert_eq!(spec.version(), None);
    }

    #[test]
    fn opaque_names_and_versions() {
        let spec = parse_dependency("foo_bar").unwrap();
        assert_eq!(spec.name(), "foo_bar");
        assert_eq!(spec.version(), None);

        let spec = parse_dependency("foo (>= 1.0@x)").unwrap();
        assert_eq!(spec.name(), "foo");
        assert_eq!(spec.version(), Some("1.0@x"));

        let spec = parse_dependency("foo (>= 1.0+really@x)").unwrap();
        assert_eq!(spec.op(), Some(VersionOp::LaterOrEqual));
        assert_eq!(spec.version(), Some("1.0+really@x"));
        assert_eq!(spec.to_string(), "foo (>= 1.0+really@x)");

        let spec = parse_dependency("_weird.name:amd64 (= 1)").unwrap();
        assert_eq!(spec.name(), "_weird.name:amd64");
    }

    #[test]
    fn reject_missing_name() {
        let err = parse_dependency("(>= 1.0)").unwrap_err();
        match &err {
            StatusDbError::MalformedDependency { token, .. } => assert_eq!(token, "(>= 1.0)"),
            e => panic!("unexpected error {:?}", e),
        }
        assert!(err.to_string().contains("(>= 1.0)"));
    }

    #[test]
    fn reject_broken_relation() {
        let tokens = [
            "libfoo (>= 1.0",
            "libfoo (=> 1.0)",
            "libfoo (>=)",
            "libfoo (>= 1.0 2)",
            "libfoo 1.0",
            "",
        ];
        for t in tokens {
            assert!(parse_dependency(t).is_err(), "{} should not parse", t);
        }
    }

    #[test]
    fn list_keeps_group_count_and_order() {
        let list = parse_dependency_list(Some(
            "libc6 (>= 2.34), libapr1 (>= 1.7.0) | libapr1t64,  \
             zlib1g ,debconf (>= 0.5) | debconf-2.0",
        ))
        .unwrap();
        assert_eq!(list.len(), 4);
        let names: Vec<&str> = list.iter().map(|g| g.specs()[0].name()).collect();
        assert_eq!(names, vec!["libc6", "libapr1", "zlib1g", "debconf"]);
        assert_eq!(list[1].len(), 2);
        assert_eq!(list[1].specs()[1].name(), "libapr1t64");
        assert_eq!(list[3].specs()[1].name(), "debconf-2.0");
    }

    #[test]
    fn missing_field_is_empty() {
        assert!(parse_dependency_list(None).unwrap().is_empty());
        assert!(parse_dependency_list(Some("  ")).unwrap().is_empty());
    }

    #[test]
    fn folded_field_value() {
        let list = parse_dependency_list(Some("libc6 (>= 2.34),\n\nlibx11-6")).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].specs()[0].name(), "libx11-6");
    }

    #[test]
    fn reject_empty_tokens() {
        for s in ["a, , b", "a,,b", "a, b,", "a | | b", "a |", "| a"] {
            assert!(
                matches!(
                    parse_dependency_list(Some(s)),
                    Err(StatusDbError::MalformedDependency { .. })
                ),
                "{} should not parse",
                s
            );
        }
    }
}
