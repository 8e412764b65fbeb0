//! Tool registry: an ordered, read-only table of installable tools

pub mod builtin;
pub mod entry;

pub use entry::ToolEntry;

use crate::config::PackageManagerConfig;
use crate::error::{RegistryError, Result};
use std::collections::HashMap;
use tracing::info;

/// Ordered mapping from tool id to its entry.
///
/// Order is insertion order and only affects display. Ids are unique.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Build a registry, rejecting duplicate ids
    pub fn new(entries: Vec<ToolEntry>) -> Result<Self> {
        let mut registry = Self::default();
        for entry in entries {
            registry.push(entry)?;
        }
        Ok(registry)
    }

    /// Build a registry from an `(id, package)` table
    pub fn from_table(
        table: &[(&str, &str)],
        package_manager: &PackageManagerConfig,
    ) -> Result<Self> {
        Self::new(
            table
                .iter()
                .map(|(id, package)| ToolEntry::packaged(id, package, package_manager))
                .collect(),
        )
    }

    fn push(&mut self, entry: ToolEntry) -> Result<()> {
        if self.index.contains_key(&entry.id) {
            return Err(RegistryError::DuplicateTool { id: entry.id }.into());
        }
        self.append(entry);
        Ok(())
    }

    fn append(&mut self, entry: ToolEntry) {
        self.index.insert(entry.id.clone(), self.entries.len());
        self.entries.push(entry);
    }

    /// Resolve a tool id
    pub fn lookup(&self, id: &str) -> std::result::Result<&ToolEntry, RegistryError> {
        self.index
            .get(id)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| RegistryError::NotFound { id: id.to_string() })
    }

    /// All entries in display order
    pub fn all(&self) -> &[ToolEntry] {
        &self.entries
    }

    /// All ids in display order
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append the entries of `other` whose ids are not present yet
    pub fn merge(mut self, other: ToolRegistry) -> Self {
        for entry in other.entries {
            if !self.contains(&entry.id) {
                self.append(entry);
            }
        }
        self
    }

    /// Apply `other` on top: same-id entries are replaced where they stand,
    /// new ids are appended
    pub fn overlay(mut self, other: ToolRegistry) -> Self {
        for entry in other.entries {
            match self.index.get(&entry.id).copied() {
                Some(i) => {
                    info!(
                        "Tool '{}' overridden: package '{}' replaces '{}'",
                        entry.id, entry.package, self.entries[i].package
                    );
                    self.entries[i] = entry;
                }
                None => self.append(entry),
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::builtin::{DEV_TOOLS, ESIM_TOOLS};
    use super::*;
    use crate::error::Error;
    use crate::runner::CommandSpec;

    fn pm() -> PackageManagerConfig {
        PackageManagerConfig::default()
    }

    #[test]
    fn test_lookup_returns_configured_command() {
        let registry = ToolRegistry::from_table(DEV_TOOLS, &pm()).unwrap();

        for (id, package) in DEV_TOOLS {
            let entry = registry.lookup(id).unwrap();
            assert_eq!(
                entry.install_command,
                CommandSpec::new("sudo", ["apt", "install", *package, "-y"])
            );
        }

        let nghdl = ToolRegistry::from_table(ESIM_TOOLS, &pm()).unwrap();
        assert_eq!(
            nghdl.lookup("nghdl").unwrap().install_command.display(),
            "sudo apt install ghdl -y"
        );
    }

    #[test]
    fn test_lookup_unknown_id() {
        let registry = ToolRegistry::from_table(DEV_TOOLS, &pm()).unwrap();

        for id in ["", "emacs", "GCC", "gcc ", "scilab"] {
            assert_eq!(
                registry.lookup(id),
                Err(RegistryError::NotFound { id: id.to_string() })
            );
        }
    }

    #[test]
    fn test_order_is_insertion_order() {
        let registry = ToolRegistry::from_table(ESIM_TOOLS, &pm()).unwrap();
        let expected: Vec<&str> = ESIM_TOOLS.iter().map(|(id, _)| *id).collect();
        assert_eq!(registry.ids(), expected);
        assert_eq!(registry.len(), ESIM_TOOLS.len());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = ToolRegistry::from_table(&[("gcc", "gcc"), ("gcc", "gcc-12")], &pm());
        assert!(matches!(
            result,
            Err(Error::Registry(RegistryError::DuplicateTool { ref id })) if id == "gcc"
        ));
    }

    #[test]
    fn test_merge_keeps_first_occurrence() {
        let dev = ToolRegistry::from_table(DEV_TOOLS, &pm()).unwrap();
        let esim = ToolRegistry::from_table(ESIM_TOOLS, &pm()).unwrap();
        let merged = dev.merge(esim);

        assert_eq!(merged.len(), 15);
        assert_eq!(
            &merged.ids()[11..],
            &["scilab", "openmodelica", "nghdl", "freehdl"]
        );
        assert!(merged.contains("gcc"));
        assert!(merged.contains("freehdl"));
    }

    #[test]
    fn test_overlay_replaces_in_place() {
        let esim = ToolRegistry::from_table(ESIM_TOOLS, &pm()).unwrap();
        let extra =
            ToolRegistry::from_table(&[("kicad", "kicad-nightly"), ("iverilog", "iverilog")], &pm())
                .unwrap();
        let merged = esim.overlay(extra);

        assert_eq!(merged.len(), ESIM_TOOLS.len() + 1);
        assert_eq!(merged.ids()[1], "kicad");
        assert_eq!(
            merged.lookup("kicad").unwrap().install_command.display(),
            "sudo apt install kicad-nightly -y"
        );
        assert_eq!(merged.ids().last(), Some(&"iverilog"));
    }

    #[test]
    fn test_default_version_command() {
        let registry = ToolRegistry::from_table(DEV_TOOLS, &pm()).unwrap();
        assert_eq!(
            registry.lookup("git").unwrap().version_command.display(),
            "git --version"
        );
    }
}
