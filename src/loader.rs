//! Source loading with a process-lifetime cache
//!
//! Each source is read and parsed at most once per canonical path. Callers get
//! `Arc` handles to immutable tables and pass them explicitly into filtering
//! and aggregation; nothing here is global.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use rustc_hash::FxHashMap;

use crate::config::DashboardConfig;
use crate::error::Result;
use crate::models::{MonitoringTable, PatientTable};
use crate::reader::read_table;

/// Both sources, loaded and ready for reporting
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub patients: Arc<PatientTable>,
    pub monitoring: Arc<MonitoringTable>,
}

impl Dataset {
    #[must_use]
    pub fn new(patients: PatientTable, monitoring: MonitoringTable) -> Self {
        Self {
            patients: Arc::new(patients),
            monitoring: Arc::new(monitoring),
        }
    }
}

/// Loads sources and caches the parsed tables by source identity
#[derive(Debug)]
pub struct DataLoader {
    config: DashboardConfig,
    patients: FxHashMap<PathBuf, Arc<PatientTable>>,
    monitoring: FxHashMap<PathBuf, Arc<MonitoringTable>>,
}

impl DataLoader {
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            patients: FxHashMap::default(),
            monitoring: FxHashMap::default(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Load the patient admission source. Any failure is returned as is; no
    /// partial table is cached.
    pub fn load_patients(&mut self, path: &Path) -> Result<Arc<PatientTable>> {
        let key = source_key(path);
        if let Some(table) = self.patients.get(&key) {
            debug!("Patient data cache hit for {}", key.display());
            return Ok(Arc::clone(table));
        }

        let source = read_table(path, self.config.batch_size)?;
        let table = Arc::new(PatientTable::from_source(&source, &self.config.date_formats)?);
        self.patients.insert(key, Arc::clone(&table));
        Ok(table)
    }

    /// Load the monitoring source
    pub fn load_monitoring(&mut self, path: &Path) -> Result<Arc<MonitoringTable>> {
        let key = source_key(path);
        if let Some(table) = self.monitoring.get(&key) {
            debug!("Monitoring data cache hit for {}", key.display());
            return Ok(Arc::clone(table));
        }

        let source = read_table(path, self.config.batch_size)?;
        let table = Arc::new(MonitoringTable::from_source(&source, &self.config.date_formats)?);
        self.monitoring.insert(key, Arc::clone(&table));
        Ok(table)
    }

    /// Load both configured sources
    pub fn load_dataset(&mut self) -> Result<Dataset> {
        let patient_path = self.config.patient_data.clone();
        let monitoring_path = self.config.monitoring_data.clone();
        Ok(Dataset {
            patients: self.load_patients(&patient_path)?,
            monitoring: self.load_monitoring(&monitoring_path)?,
        })
    }

    /// Drop every cached table so the next load reads from storage again
    pub fn invalidate(&mut self) {
        self.patients.clear();
        self.monitoring.clear();
    }

    #[must_use]
    pub fn cached_sources(&self) -> usize {
        self.patients.len() + self.monitoring.len()
    }
}

fn source_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
