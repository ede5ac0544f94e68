use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use std::collections::HashSet;
use std::path::Path;

use crate::analysis::AttackReport;
use crate::data::collection::CardCollection;
use crate::data::loader::{load_collection, load_species, save_collection};
use crate::export::TextExporter;
use crate::extract::ExtractConfig;
use crate::rip::Ripper;

/// Python-facing ripper that accumulates extracted sets into a collection.
#[pyclass]
pub struct PyCardRipper {
    config: ExtractConfig,
    species: HashSet<String>,
    collection: CardCollection,
}

#[pymethods]
impl PyCardRipper {
    /// Create a ripper from the list of creature species names and an
    /// optional JSON file with symbol/clause tables.
    #[new]
    #[pyo3(signature = (species, config_path=None))]
    fn new(species: Vec<String>, config_path: Option<&str>) -> PyResult<Self> {
        let config = match config_path {
            Some(path) => ExtractConfig::from_json_file(Path::new(path))
                .map_err(|e| PyValueError::new_err(e.to_string()))?,
            None => ExtractConfig::default(),
        };
        Ok(PyCardRipper {
            config,
            species: species.into_iter().collect(),
            collection: CardCollection::new(),
        })
    }

    /// Like the constructor, reading species names from a file with one
    /// name per line.
    #[staticmethod]
    #[pyo3(signature = (species_path, config_path=None))]
    fn from_species_file(species_path: &str, config_path: Option<&str>) -> PyResult<Self> {
        let species =
            load_species(Path::new(species_path)).map_err(|e| PyIOError::new_err(e.to_string()))?;
        Self::new(species.into_iter().collect(), config_path)
    }

    /// Extract one card page and return the record as JSON.
    #[pyo3(signature = (html, type_hint=None))]
    fn extract_page(&self, html: &str, type_hint: Option<Vec<String>>) -> PyResult<String> {
        let ripper = Ripper::new(&self.config, &self.species);
        let extracted = ripper
            .extract_html(html, type_hint)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        serde_json::to_string(&extracted.record).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Extract a set from `(html, type_hint)` pairs and append it to the
    /// collection. Returns `(records, [(page index, error)])`.
    fn rip_set(
        &mut self,
        name: &str,
        pages: Vec<(String, Option<Vec<String>>)>,
    ) -> (usize, Vec<(usize, String)>) {
        let ripper = Ripper::new(&self.config, &self.species);
        let report = ripper.rip_html_set(
            name,
            pages.iter().map(|(html, hint)| (html.as_str(), hint.clone())),
        );
        let failures = report
            .failures
            .iter()
            .map(|f| (f.index, f.error.to_string()))
            .collect();
        let records = report.set.len();
        self.collection.push(report.set);
        (records, failures)
    }

    /// Number of sets collected so far.
    fn set_count(&self) -> usize {
        self.collection.sets.len()
    }

    fn save(&self, path: &str) -> PyResult<()> {
        save_collection(Path::new(path), &self.collection)
            .map_err(|e| PyIOError::new_err(e.to_string()))
    }

    fn load(&mut self, path: &str) -> PyResult<()> {
        self.collection =
            load_collection(Path::new(path)).map_err(|e| PyIOError::new_err(e.to_string()))?;
        Ok(())
    }

    /// Write the description text files into `dir`; returns the card line count.
    fn export_text(&self, dir: &str) -> PyResult<usize> {
        let exporter = TextExporter::new(dir).with_species(self.species.iter().cloned());
        let summary = exporter
            .export(&self.collection)
            .map_err(|e| PyIOError::new_err(e.to_string()))?;
        Ok(summary.cards)
    }

    #[pyo3(signature = (top=10))]
    fn attack_report(&self, top: usize) -> String {
        AttackReport::from_collection(&self.collection, top).render()
    }
}

/// Register the PyO3 module.
#[pymodule]
pub fn tcg_card_rip(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCardRipper>()?;
    Ok(())
}
