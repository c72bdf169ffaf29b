/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, anyhow};
use yaml_rust::{Yaml, YamlLoader, yaml};

use super::LayoutConfig;

fn normalize(raw: &str) -> String {
    raw.to_lowercase().replace('-', "_")
}

fn foreach_kv<F>(table: &yaml::Hash, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str, &Yaml) -> anyhow::Result<()>,
{
    for (k, v) in table.iter() {
        if let Yaml::String(key) = k {
            f(key, v).context(format!("failed to parse value of key {key}"))?;
        } else {
            return Err(anyhow!("key in hash should be string"));
        }
    }
    Ok(())
}

fn as_string(v: &Yaml) -> anyhow::Result<String> {
    match v {
        Yaml::String(s) => Ok(s.to_string()),
        Yaml::Integer(i) => Ok(i.to_string()),
        Yaml::Real(s) => Ok(s.to_string()),
        _ => Err(anyhow!(
            "yaml value type for string should be 'string' / 'integer' / 'real'"
        )),
    }
}

fn as_usize(v: &Yaml) -> anyhow::Result<usize> {
    match v {
        Yaml::String(s) => Ok(usize::from_str(s)?),
        Yaml::Integer(i) => Ok(usize::try_from(*i)?),
        _ => Err(anyhow!(
            "yaml value type for 'usize' should be 'string' or 'integer'"
        )),
    }
}

impl LayoutConfig {
    /// Parse from a yaml map, or from a plain string naming the formatter.
    pub fn parse_yaml(v: &Yaml) -> anyhow::Result<Self> {
        let mut config = LayoutConfig::default();
        match v {
            Yaml::String(s) => {
                config.set_formatter(s)?;
            }
            Yaml::Hash(map) => {
                foreach_kv(map, |k, v| match normalize(k).as_str() {
                    "timestamp_format" | "timestamp_pattern" => {
                        let pattern = as_string(v)?;
                        config.set_timestamp_format(&pattern)?;
                        Ok(())
                    }
                    "timezone" | "time_zone" => {
                        let id = as_string(v)?;
                        config.set_timezone(&id)?;
                        Ok(())
                    }
                    "formatter" => {
                        let name = as_string(v)?;
                        config.set_formatter(&name)?;
                        Ok(())
                    }
                    "context_name" | "context" => {
                        config.set_context_name(as_string(v)?);
                        Ok(())
                    }
                    "exception_max_depth" => {
                        let depth = as_usize(v)
                            .context(format!("invalid usize value for key {k}"))?;
                        config.set_exception_max_depth(depth);
                        Ok(())
                    }
                    "access_skip_paths" => {
                        let paths = match v {
                            Yaml::Array(seq) => seq
                                .iter()
                                .map(as_string)
                                .collect::<anyhow::Result<Vec<String>>>()?,
                            _ => vec![as_string(v)?],
                        };
                        config.set_access_skip_paths(paths);
                        Ok(())
                    }
                    _ => Err(anyhow!("invalid key {k}")),
                })?;
            }
            Yaml::Null => {}
            _ => return Err(anyhow!("invalid yaml value type for layout config")),
        }
        Ok(config)
    }

    pub fn parse_yaml_str(s: &str) -> anyhow::Result<Self> {
        let docs = YamlLoader::load_from_str(s).context("invalid yaml document")?;
        match docs.first() {
            Some(doc) => LayoutConfig::parse_yaml(doc),
            None => Ok(LayoutConfig::default()),
        }
    }

    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read config file {}: {e}", path.display()))?;
        LayoutConfig::parse_yaml_str(&content)
            .context(format!("failed to load config file {}", path.display()))
    }
}
