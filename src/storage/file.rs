// ============================================================================
// Structure : FileStore
// ============================================================================
// Stockage durable : un fichier <clé>.json par clé dans un répertoire
//
// Emplacement par défaut (via dirs::data_dir) :
// - Linux : ~/.local/share/coinboard/
// - macOS : ~/Library/Application Support/coinboard/
// - Windows : C:\Users\<user>\AppData\Roaming\coinboard\
//
// CONCEPT : Écriture atomique
// - On écrit dans un fichier temporaire puis on le renomme
// - Un crash pendant l'écriture laisse l'ancienne valeur intacte
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::KeyValueStore;

/// Stockage fichier (un profil = un répertoire)
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Ouvre (et crée si besoin) le répertoire de stockage
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Échec de la création du répertoire {}", dir.display()))?;
        debug!(dir = %dir.display(), "File store opened");
        Ok(Self { dir })
    }

    /// Répertoire par défaut de l'application
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("coinboard"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Chemin du fichier d'une clé
    ///
    /// Les caractères hors [A-Za-z0-9_-] sont remplacés par '_' pour
    /// qu'une clé ne puisse pas sortir du répertoire.
    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl KeyValueStore for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Échec de la lecture de {}", path.display())),
        }
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value)
            .with_context(|| format!("Échec de l'écriture de {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Échec du renommage vers {}", path.display()))?;

        debug!(key, bytes = value.len(), "Persisted key");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Échec de la suppression de {}", path.display())),
        }
    }
}
