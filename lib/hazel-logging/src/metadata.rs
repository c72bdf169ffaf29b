/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::env;
use std::fmt;
use std::str::FromStr;

pub const DISTRIBUTION_ENV: &str = "HAZEL_DISTRIBUTION_TYPE";
pub const DEDICATED_NODE_ENV: &str = "WINTERFOX_DEDI_NODE";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Distribution {
    #[default]
    Unknown,
    Docker,
    Tar,
    Zip,
    Rpm,
    Deb,
}

impl Distribution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Distribution::Unknown => "unknown",
            Distribution::Docker => "docker",
            Distribution::Tar => "tar",
            Distribution::Zip => "zip",
            Distribution::Rpm => "rpm",
            Distribution::Deb => "deb",
        }
    }

    /// Parse the distribution key, unrecognized values map to `Unknown`.
    pub fn from_key(key: &str) -> Self {
        Distribution::from_str(key).unwrap_or_default()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Distribution {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docker" => Ok(Distribution::Docker),
            "tar" => Ok(Distribution::Tar),
            "zip" => Ok(Distribution::Zip),
            "rpm" => Ok(Distribution::Rpm),
            "deb" => Ok(Distribution::Deb),
            "unknown" => Ok(Distribution::Unknown),
            _ => Err(()),
        }
    }
}

/// Product build information attached to each log record.
///
/// The values are fixed for the lifetime of the process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildMetadata {
    distribution: Distribution,
    build_date: String,
    commit_hash: String,
    version: String,
    dedicated_node: Option<String>,
}

impl BuildMetadata {
    pub fn new<V, C, D>(version: V, commit_hash: C, build_date: D) -> Self
    where
        V: Into<String>,
        C: Into<String>,
        D: Into<String>,
    {
        BuildMetadata {
            distribution: Distribution::Unknown,
            build_date: build_date.into(),
            commit_hash: commit_hash.into(),
            version: version.into(),
            dedicated_node: None,
        }
    }

    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Empty node names are treated as absent.
    pub fn with_dedicated_node(mut self, node: Option<String>) -> Self {
        self.dedicated_node = node.filter(|s| !s.is_empty());
        self
    }

    /// Fill the distribution and the dedicated node from the process
    /// environment.
    pub fn detect_runtime(self) -> Self {
        let distribution = env::var(DISTRIBUTION_ENV)
            .map(|s| Distribution::from_key(&s))
            .unwrap_or_default();
        let node = env::var(DEDICATED_NODE_ENV).ok();
        self.with_distribution(distribution).with_dedicated_node(node)
    }

    #[inline]
    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    #[inline]
    pub fn build_date(&self) -> &str {
        &self.build_date
    }

    #[inline]
    pub fn commit_hash(&self) -> &str {
        &self.commit_hash
    }

    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[inline]
    pub fn dedicated_node(&self) -> Option<&str> {
        self.dedicated_node.as_deref()
    }
}
