use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::{Error, Recipe, Result};

/// Raw persistence backend for the custom recipe partition.
///
/// A backend stores a single opaque document; the catalog never
/// persists built-in recipes through it.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    async fn read_raw(&self) -> Result<Option<Vec<u8>>>;
    async fn write_raw(&self, value: &[u8]) -> Result<()>;
}

#[async_trait]
pub trait RecipeStore: StoreBackend {
    /// Loads the persisted custom recipes, empty when nothing was
    /// saved yet.
    async fn load(&self) -> Result<BTreeMap<String, Recipe>> {
        match self.read_raw().await? {
            Some(raw) => {
                let recipes = serde_json::from_slice::<BTreeMap<String, Recipe>>(&raw)?;
                Ok(recipes)
            }
            None => Ok(BTreeMap::new()),
        }
    }

    /// Persists the custom recipe partition.
    async fn persist(&self, recipes: &BTreeMap<String, Recipe>) -> Result<()> {
        let raw = serde_json::to_vec_pretty(recipes)?;
        self.write_raw(&raw).await
    }
}

/// Every backend gets the typed interface for free
impl<T: StoreBackend> RecipeStore for T {}

/// Recipe store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Opens the store at the platform default location,
    /// e.g. `~/.local/share/<app>/recipes.json` on Linux.
    pub fn with_default_path(app_name: &str) -> Result<Self> {
        let dir = Self::default_data_dir(app_name)?;
        Ok(Self::new(dir.join("recipes.json")))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn default_data_dir(app_name: &str) -> Result<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            if let Some(home) = std::env::var_os("HOME") {
                Ok(PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join(app_name))
            } else {
                Err(Error::Store("Cannot determine data directory".to_string()))
            }
        }

        #[cfg(target_os = "linux")]
        {
            if let Some(data_dir) = std::env::var_os("XDG_DATA_HOME") {
                Ok(PathBuf::from(data_dir).join(app_name))
            } else if let Some(home) = std::env::var_os("HOME") {
                Ok(PathBuf::from(home)
                    .join(".local")
                    .join("share")
                    .join(app_name))
            } else {
                Err(Error::Store("Cannot determine data directory".to_string()))
            }
        }

        #[cfg(target_os = "windows")]
        {
            if let Some(local_app_data) = std::env::var_os("LOCALAPPDATA") {
                Ok(PathBuf::from(local_app_data).join(app_name))
            } else {
                Err(Error::Store("Cannot determine data directory".to_string()))
            }
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            Err(Error::Store(
                "Unsupported operating system for data directory detection".to_string(),
            ))
        }
    }
}

#[async_trait]
impl StoreBackend for FileStore {
    async fn read_raw(&self) -> Result<Option<Vec<u8>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = tokio::fs::read(&self.path)
            .await
            .map_err(|e| Error::Store(format!("Failed to read recipe file: {}", e)))?;

        Ok(Some(content))
    }

    async fn write_raw(&self, value: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Store(format!("Failed to create data directory: {}", e)))?;
        }

        tokio::fs::write(&self.path, value)
            .await
            .map_err(|e| Error::Store(format!("Failed to write recipe file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Step, StepKind};

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join("bread-ics-store-test");
        let _ = tokio::fs::remove_dir_all(&dir).await;
        let store = FileStore::new(dir.join("recipes.json"));

        assert!(store.load().await.unwrap().is_empty());

        let mut recipes = BTreeMap::new();
        recipes.insert(
            "rye-loaf".to_string(),
            Recipe::new("Rye Loaf", vec![Step::new("Mixing", 0.5, StepKind::Active)]),
        );
        store.persist(&recipes).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, recipes);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
