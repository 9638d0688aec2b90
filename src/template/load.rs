use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::TemplateName;
use crate::error::PublishError;

/// The parts of `meta.json` this tool reads; other keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateMeta {
    pub subject: String,
}

fn dist_dir(root: &Path, name: &TemplateName) -> PathBuf {
    root.join("packages").join(name.as_str()).join("dist")
}

pub fn html_path(root: &Path, name: &TemplateName) -> PathBuf {
    dist_dir(root, name).join("template.html")
}

pub fn meta_path(root: &Path, name: &TemplateName) -> PathBuf {
    dist_dir(root, name).join("meta.json")
}

fn read(path: PathBuf) -> Result<(PathBuf, String), PublishError> {
    match fs::read_to_string(&path) {
        Ok(s) => Ok((path, s)),
        Err(source) => Err(PublishError::FileRead { path, source }),
    }
}

pub fn load_html(root: &Path, name: &TemplateName) -> Result<String, PublishError> {
    read(html_path(root, name)).map(|(_, html)| html)
}

pub fn load_metadata(root: &Path, name: &TemplateName) -> Result<TemplateMeta, PublishError> {
    let (path, raw) = read(meta_path(root, name))?;
    serde_json::from_str(&raw).map_err(|source| PublishError::Parse { path, source })
}
