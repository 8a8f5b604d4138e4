mod stanza;
mod status;

pub use stanza::Package;

use crate::{debug, error::StatusDbError};

use std::{
    cmp::Reverse,
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

// Below this a name is too different to be suggested as a typo fix
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Installed packages from a dpkg status database, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDatabase {
    pkgs: BTreeMap<String, Package>,
}

impl PackageDatabase {
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, StatusDbError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|source| StatusDbError::Open {
            path: path.to_owned(),
            source,
        })?;
        debug!("Reading dpkg status database at {}", path.display());
        let mut reader = BufReader::new(f);
        Self::from_reader(&mut reader)
    }

    /// Read every stanza from `reader` and keep the installed ones.
    /// A later record for the same package replaces the earlier one.
    pub fn from_reader(reader: &mut impl BufRead) -> Result<Self, StatusDbError> {
        let mut pkgs = BTreeMap::new();
        let mut records = 0;

        while !reader.fill_buf()?.is_empty() {
            let pkg = Package::read_from(reader)?;
            if pkg.is_empty() {
                // Extra blank lines between stanzas
                continue;
            }
            records += 1;

            let name = match pkg.name() {
                Some(name) => name.to_owned(),
                None => {
                    debug!("Skipping record without Package field");
                    continue;
                }
            };
            if !pkg.installed() {
                match pkg.status() {
                    Ok(Some(status)) => debug!("Skipping {}, state is {}", name, status.state),
                    Ok(None) => debug!("Skipping {} without Status field", name),
                    Err(e) => debug!("Skipping {}: {}", name, e),
                }
                continue;
            }
            if pkgs.insert(name.clone(), pkg).is_some() {
                debug!("Duplicate record for {}, keeping the later one", name);
            }
        }

        debug!("Read {} records, {} installed", records, pkgs.len());
        Ok(PackageDatabase { pkgs })
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.pkgs.get(name)
    }

    pub fn len(&self) -> usize {
        self.pkgs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pkgs.is_empty()
    }

    /// Packages in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Package)> {
        self.pkgs.iter().map(|(name, pkg)| (name.as_str(), pkg))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pkgs.keys().map(String::as_str)
    }

    /// Installed packages whose name or description mentions `keyword`,
    /// most similar names first
    pub fn search(&self, keyword: &str) -> Vec<&Package> {
        let mut res: Vec<(&str, &Package)> = self
            .iter()
            .filter(|(name, pkg)| {
                name.contains(keyword)
                    || pkg
                        .field("Description")
                        .map_or(false, |desc| desc.contains(keyword))
            })
            .collect();

        // Sort pkg in descending order based on relevance to keyword
        res.sort_by_cached_key(|(name, _)| {
            Reverse((255.0 * strsim::jaro_winkler(name, keyword)) as u8)
        });
        res.into_iter().map(|(_, pkg)| pkg).collect()
    }

    /// The installed package name most similar to `name`, if any is close
    pub fn closest(&self, name: &str) -> Option<&str> {
        self.names()
            .map(|candidate| (candidate, strsim::jaro_winkler(candidate, name)))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(candidate, _)| candidate)
    }
}
