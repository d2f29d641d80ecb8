// ABOUTME: Startup validation of both backing files without mutating them.
// ABOUTME: Decodes each file through the snapshot gateway and summarizes ledgers and their priority density.

use std::fmt;
use std::path::Path;

use crate::disease_info::DiseaseCatalog;
use crate::error::StoreError;
use crate::snapshot::SnapshotFile;
use crate::treatments::Treatments;

/// Per-category summary of a treatment ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSummary {
    pub category: String,
    pub records: usize,
    /// Whether stored priorities already form `1..=N`.
    pub dense: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub medicines_present: bool,
    pub disease_info_present: bool,
    pub ledgers: Vec<LedgerSummary>,
    pub disease_info_entries: usize,
}

impl CheckReport {
    pub fn total_records(&self) -> usize {
        self.ledgers.iter().map(|l| l.records).sum()
    }

    /// Categories whose stored priorities have gaps or duplicates. They are
    /// renumbered on the next write to that category.
    pub fn sparse_categories(&self) -> impl Iterator<Item = &str> {
        self.ledgers
            .iter()
            .filter(|l| !l.dense)
            .map(|l| l.category.as_str())
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.medicines_present {
            writeln!(f, "medicines file missing, will start empty")?;
        }
        writeln!(f, "{} disease categories", self.ledgers.len())?;
        for ledger in &self.ledgers {
            let note = if ledger.dense { "" } else { " (priorities not dense)" };
            writeln!(f, "  {}: {} records{}", ledger.category, ledger.records, note)?;
        }
        writeln!(f, "{} records in total", self.total_records())?;
        if !self.disease_info_present {
            writeln!(f, "disease info file missing, will start empty")?;
        }
        write!(f, "{} disease info entries", self.disease_info_entries)
    }
}

/// Decode both files and summarize them. Malformed content in either file is
/// returned as a persistence error.
pub fn check_files(medicines: &Path, disease_info: &Path) -> Result<CheckReport, StoreError> {
    let medicines_file = SnapshotFile::new(medicines);
    let info_file = SnapshotFile::new(disease_info);

    let treatments: Treatments = medicines_file.load()?;
    let catalog: DiseaseCatalog = info_file.load()?;

    let ledgers = treatments
        .iter()
        .map(|(category, ledger)| LedgerSummary {
            category: category.clone(),
            records: ledger.len(),
            dense: ledger.is_dense(),
        })
        .collect();

    Ok(CheckReport {
        medicines_present: medicines_file.exists(),
        disease_info_present: info_file.exists(),
        ledgers,
        disease_info_entries: catalog.len(),
    })
}
