//! Registry of named scanners ordered by most recent touch.
//!
//! Registering or touching a scanner moves it to the end of the order and
//! makes it the active scanner. The active scanner is tracked explicitly
//! rather than read off the end of the order.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;
use vision_foundation::{Error, ErrorKind, Result};
use vision_language::Scanner;

/// Named scanners with touch-order recency.
#[derive(Debug, Default)]
pub struct ScannerRegistry {
    scanners: HashMap<String, Scanner>,
    /// Names, least recently touched first.
    order: Vec<String>,
    active: Option<String>,
}

impl ScannerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `scanner` and makes it active.
    ///
    /// If a scanner of the same name is already registered, the existing
    /// one is kept and touched; `scanner` is dropped.
    pub fn register(&mut self, scanner: Scanner) -> &mut Scanner {
        let name = scanner.name().to_string();
        self.move_to_end(&name);
        match self.scanners.entry(name) {
            Entry::Occupied(entry) => {
                debug!(scanner = %entry.key(), "scanner already registered; touching");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                debug!(scanner = %entry.key(), lines = scanner.len(), "registered scanner");
                entry.insert(scanner)
            }
        }
    }

    /// Makes the named scanner the most recent and active one.
    pub fn touch(&mut self, name: &str) -> Result<()> {
        if !self.scanners.contains_key(name) {
            return Err(Error::new(ErrorKind::UnknownScanner(name.to_string())));
        }
        self.move_to_end(name);
        Ok(())
    }

    /// Removes the named scanner. The next most recent becomes active.
    pub fn remove(&mut self, name: &str) -> Result<Scanner> {
        let scanner = self
            .scanners
            .remove(name)
            .ok_or_else(|| Error::new(ErrorKind::UnknownScanner(name.to_string())))?;
        self.order.retain(|n| n != name);
        self.active = self.order.last().cloned();
        debug!(scanner = %name, active = ?self.active, "removed scanner");
        Ok(scanner)
    }

    /// Returns the active scanner.
    #[must_use]
    pub fn active(&self) -> Option<&Scanner> {
        self.active.as_deref().and_then(|name| self.scanners.get(name))
    }

    /// Returns the active scanner mutably.
    pub fn active_mut(&mut self) -> Option<&mut Scanner> {
        let name = self.active.as_deref()?;
        self.scanners.get_mut(name)
    }

    /// Returns the name of the active scanner.
    #[must_use]
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Returns the most recently touched scanner whose name satisfies `pred`.
    pub fn most_recent(&self, pred: impl Fn(&str) -> bool) -> Option<&Scanner> {
        self.order
            .iter()
            .rev()
            .find(|name| pred(name.as_str()))
            .and_then(|name| self.scanners.get(name))
    }

    /// Mutable form of [`most_recent`](Self::most_recent).
    pub fn most_recent_mut(&mut self, pred: impl Fn(&str) -> bool) -> Option<&mut Scanner> {
        let name = self.order.iter().rev().find(|name| pred(name.as_str()))?;
        self.scanners.get_mut(name)
    }

    /// Returns a scanner by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Scanner> {
        self.scanners.get(name)
    }

    /// Returns a scanner by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Scanner> {
        self.scanners.get_mut(name)
    }

    /// Returns the names, least recently touched first.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Returns the number of registered scanners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scanners.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scanners.is_empty()
    }

    fn move_to_end(&mut self, name: &str) {
        self.order.retain(|n| n != name);
        self.order.push(name.to_string());
        self.active = Some(name.to_string());
    }
}
