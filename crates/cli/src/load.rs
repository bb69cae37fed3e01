use std::path::{Path, PathBuf};

use thiserror::Error;

use menucost_catalog::{Catalog, CatalogSnapshot};
use menucost_core::DomainError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog {path} is not a valid snapshot: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Read a catalog snapshot file and index it.
pub fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = CatalogSnapshot::from_json(&json).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        ingredients = snapshot.ingredients.len(),
        semifinished = snapshot.semifinished.len(),
        recipes = snapshot.recipes.len(),
        "catalog snapshot read"
    );

    Ok(Catalog::from_snapshot(snapshot)?)
}
