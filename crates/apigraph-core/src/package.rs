use std::collections::{BTreeMap, BTreeSet};

use apigraph_error::Result;

use crate::visibility::is_exported;

/// A package and the names declared in its top-level scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    path: String,
    name: String,
    members: BTreeSet<String>,
}

impl Package {
    /// The short name defaults to the last path segment.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path).to_string();
        Self {
            path,
            name,
            members: BTreeSet::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members.extend(members.into_iter().map(Into::into));
        self
    }

    pub fn add_member(&mut self, name: impl Into<String>) {
        self.members.insert(name.into());
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member names in sorted order.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    /// Exported member names in sorted order. Fails on an empty member name.
    pub fn exported_members(&self) -> Result<Vec<&str>> {
        let mut exported = Vec::new();
        for member in self.members() {
            if is_exported(member).map_err(|e| e.with_context("package", self.path.clone()))? {
                exported.push(member);
            }
        }
        Ok(exported)
    }
}

/// The packages a run was asked about, keyed and ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSet {
    packages: BTreeMap<String, Package>,
}

impl PackageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a package, replacing and returning any package with the same path.
    pub fn insert(&mut self, package: Package) -> Option<Package> {
        self.packages.insert(package.path.clone(), package)
    }

    pub fn get(&self, path: &str) -> Option<&Package> {
        self.packages.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.packages.contains_key(path)
    }

    /// Packages in ascending path order.
    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl FromIterator<Package> for PackageSet {
    fn from_iter<T: IntoIterator<Item = Package>>(iter: T) -> Self {
        let mut set = PackageSet::new();
        for package in iter {
            set.insert(package);
        }
        set
    }
}
