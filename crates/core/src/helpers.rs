use anyhow::{Context, Error};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub fn load_toml<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, Error> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .with_context(|| format!("can't read file {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("can't parse TOML content from {}", path.display()))
}
