//! Option source for the select fields

use super::model::SelectOption;

/// Read-only lists of (value, label) pairs offered by the select fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionCatalog {
    pub data_types: Vec<SelectOption>,
    pub data_frequencies: Vec<SelectOption>,
}

impl OptionCatalog {
    pub fn new(data_types: Vec<SelectOption>, data_frequencies: Vec<SelectOption>) -> Self {
        Self {
            data_types,
            data_frequencies,
        }
    }

    pub fn data_type_at(&self, index: usize) -> Option<&SelectOption> {
        self.data_types.get(index)
    }

    pub fn data_frequency_at(&self, index: usize) -> Option<&SelectOption> {
        self.data_frequencies.get(index)
    }

    /// Position of the option with the given value
    pub fn frequency_index(&self, value: &str) -> Option<usize> {
        self.data_frequencies.iter().position(|o| o.value == value)
    }
}

impl Default for OptionCatalog {
    fn default() -> Self {
        Self {
            data_types: vec![
                SelectOption::new("tabular", "Tabular (CSV, Excel)"),
                SelectOption::new("geoespacial", "Geoespacial"),
                SelectOption::new("api", "API / Servicio web"),
                SelectOption::new("documental", "Documentos"),
                SelectOption::new("multimedia", "Imágenes / Multimedia"),
            ],
            data_frequencies: vec![
                SelectOption::new("unica", "Única vez"),
                SelectOption::new("diaria", "Diaria"),
                SelectOption::new("semanal", "Semanal"),
                SelectOption::new("mensual", "Mensual"),
                SelectOption::new("trimestral", "Trimestral"),
                SelectOption::new("anual", "Anual"),
            ],
        }
    }
}
