//! Command-line option groups.
//!
//! Each group is a clap [`Args`] struct so it can be flattened into the binary's
//! parser, and maps onto the library option types of the crate that consumes it.

use clap::{Args, ValueEnum};

use apigraph_collect::{LabelMode, ProjectionOptions};
use apigraph_core::{MatchMode, TraversalOptions};
use apigraph_dot::{DEFAULT_TITLE, DotOptions};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchArg {
    /// Package path and member name must both match
    #[default]
    Qualified,
    /// Any symbol sharing an exported member's simple name is a seed
    Name,
}

impl From<MatchArg> for MatchMode {
    fn from(arg: MatchArg) -> Self {
        match arg {
            MatchArg::Qualified => MatchMode::Qualified,
            MatchArg::Name => MatchMode::SimpleName,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelArg {
    #[default]
    Qualified,
    Simple,
    /// Simple names inside the analysed packages, qualified outside
    Scoped,
}

impl From<LabelArg> for LabelMode {
    fn from(arg: LabelArg) -> Self {
        match arg {
            LabelArg::Qualified => LabelMode::Qualified,
            LabelArg::Simple => LabelMode::Simple,
            LabelArg::Scoped => LabelMode::Scoped,
        }
    }
}

/// Which packages are analysed and how their members are matched.
#[derive(Args, Debug, Clone, Default)]
pub struct ScopeOptions {
    /// Package path to analyse (repeatable). Defaults to the packages the
    /// graph file marks as requested.
    #[arg(
        short = 'p',
        long = "pkg",
        value_name = "PKG",
        action = clap::ArgAction::Append
    )]
    pub packages: Vec<String>,

    /// How graph nodes are matched against exported members
    #[arg(long = "match", value_enum, default_value_t = MatchArg::Qualified)]
    pub match_mode: MatchArg,
}

/// How the diagram is labelled and laid out.
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[arg(long = "labels", value_enum, default_value_t = LabelArg::Qualified)]
    pub labels: LabelArg,

    /// Group nodes into one cluster per package
    #[arg(long = "cluster-by-package")]
    pub cluster_by_package: bool,

    /// Name of the emitted digraph
    #[arg(long, value_name = "NAME", default_value = DEFAULT_TITLE)]
    pub title: String,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            labels: LabelArg::default(),
            cluster_by_package: false,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl ScopeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_packages(mut self, packages: Vec<String>) -> Self {
        self.packages = packages;
        self
    }

    pub fn with_match_mode(mut self, match_mode: MatchArg) -> Self {
        self.match_mode = match_mode;
        self
    }

    pub fn traversal(&self) -> TraversalOptions {
        TraversalOptions::new().with_match_mode(self.match_mode.into())
    }
}

impl RenderArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(mut self, labels: LabelArg) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_cluster_by_package(mut self, cluster_by_package: bool) -> Self {
        self.cluster_by_package = cluster_by_package;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn projection(&self) -> ProjectionOptions {
        ProjectionOptions::new().with_label_mode(self.labels.into())
    }

    pub fn dot(&self) -> DotOptions {
        DotOptions::new()
            .with_title(self.title.clone())
            .with_cluster_by_package(self.cluster_by_package)
    }
}
