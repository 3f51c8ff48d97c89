use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use hocon::{Hocon, HoconLoader};
use log::debug;

use crate::FsExt;

/// Reads settings for one command scope out of a HOCON file.
///
/// A key is resolved from the process environment first (exact name, then upper case),
/// then from the command scope, then from the top level of the file.
#[derive(Debug)]
pub struct ConfigLoader {
    hocon: Hocon,
    env: HashMap<String, String>,
    scope: String,
}

impl ConfigLoader {
    pub fn new(path: impl AsRef<Path>, scope: String) -> Result<Self> {
        let path = path.as_ref();

        let hocon = HoconLoader::new()
            .load_file(path)
            .with_context(|| format!("Failed to find or load config file at: {:?}", path))?
            .hocon()
            .with_context(|| format!("Failed to parse config file at: {:?}", path))?;

        debug!("Loaded config {:?} with scope {}", path, scope);

        Ok(Self::with_hocon(hocon, scope))
    }

    pub fn from_hocon_str(config: &str, scope: String) -> Result<Self> {
        let hocon = HoconLoader::new()
            .load_str(config)
            .context("Failed to load config")?
            .hocon()
            .context("Failed to parse config")?;

        Ok(Self::with_hocon(hocon, scope))
    }

    /// A loader without a backing file. Only environment variables and defaults apply.
    pub fn env_only(scope: String) -> Self {
        Self::with_hocon(Hocon::Null, scope)
    }

    fn with_hocon(hocon: Hocon, scope: String) -> Self {
        let env = std::env::vars().collect::<HashMap<_, _>>();

        Self { hocon, env, scope }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self
            .env
            .get(name)
            .or_else(|| self.env.get(&name.to_uppercase()))
        {
            return Some(Value::String(value.clone()));
        }

        let scope = &self.hocon[self.scope.as_str()];
        if matches!(scope, Hocon::Hash(_)) {
            if let Some(value) = Self::map_hocon(scope, name) {
                return Some(value);
            }
        }

        Self::map_hocon(&self.hocon, name)
    }

    /// Resolves a path setting against the current working directory.
    pub fn get_relative_path_or(&self, name: &str, default: &str) -> Result<PathBuf> {
        let path = self
            .get(name)
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| default.to_string());

        path.relative_to_cwd()
            .with_context(|| format!("Failed to resolve path for {}", name))
    }

    pub fn load<T: Config>(&self) -> Result<T> {
        let res = T::load(self)?;
        Ok(res)
    }

    fn map_hocon(hocon: &Hocon, name: &str) -> Option<Value> {
        match &hocon[name] {
            Hocon::Real(f64) => Some(Value::Float(*f64)),
            Hocon::Integer(i64) => usize::try_from(*i64).ok().map(Value::Integer),
            Hocon::String(string) => Some(Value::String(string.clone())),
            Hocon::Boolean(bool) => Some(Value::Boolean(*bool)),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Value {
    String(String),
    Integer(usize),
    Float(f64),
    Boolean(bool),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(val) => Some(*val),
            Value::String(val) => Hocon::String(val.clone()).as_bool(),
            _ => None,
        }
    }

    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Value::Integer(val) => Some(*val),
            Value::String(val) => val.parse::<usize>().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(val) => Some(*val),
            Value::Integer(val) => Some(*val as f64),
            Value::String(val) => val.parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::String(val) => Some(val.clone()),
            Value::Boolean(true) => Some("true".to_string()),
            Value::Boolean(false) => Some("false".to_string()),
            Value::Float(val) => Some(val.to_string()),
            Value::Integer(val) => Some(val.to_string()),
        }
    }
}

pub trait Config {
    fn load(config: &ConfigLoader) -> Result<Self>
    where
        Self: Sized;
}
