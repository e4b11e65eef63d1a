//! Report content: what the exports contain, independent of file format.
//!
//! The document export is a titled list of numbered lines. The workbook
//! export is one sheet per record type, a header row of field names and one
//! row per record. Renderers in `adapters::export` turn these into bytes.

use crate::domain::activity::Activity;
use crate::domain::prospect::Prospect;

/// Default title of the prospect list document.
pub const DEFAULT_DOCUMENT_TITLE: &str = "Daftar Prospek";

/// Base filename of the prospect list document (`.pdf` is appended).
pub const DOCUMENT_BASE_FILENAME: &str = "daftar_prospek";

/// Base filename of the marketing workbook (`.xlsx` is appended).
pub const WORKBOOK_BASE_FILENAME: &str = "laporan_marketing";

pub const PROSPECT_SHEET: &str = "Prospek";
pub const ACTIVITY_SHEET: &str = "Aktivitas";

/// A record that can be laid out as one spreadsheet row.
///
/// `COLUMNS` lists the field names in declaration order and `cells` yields
/// the values in the same order, as the store holds them.
pub trait TabularRecord {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn text_or_empty<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl TabularRecord for Prospect {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "contact",
        "company",
        "source",
        "status",
        "description",
        "location",
        "contact_person",
        "email",
        "position",
        "phone",
        "assigned_to",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.contact.clone(),
            self.company.clone(),
            text_or_empty(self.source),
            self.status.to_string(),
            self.description.clone(),
            self.location.clone(),
            self.contact_person.clone(),
            self.email.clone(),
            self.position.clone(),
            self.phone.clone(),
            text_or_empty(self.assigned_to),
        ]
    }
}

impl TabularRecord for Activity {
    const COLUMNS: &'static [&'static str] = &["id", "prospect_id", "activity_type", "notes", "date"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            text_or_empty(self.prospect_id),
            text_or_empty(self.activity_type),
            self.notes.clone(),
            self.date.format("%Y-%m-%d").to_string(),
        ]
    }
}

/// A titled list of text lines, laid out top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub title: String,
    pub lines: Vec<String>,
}

/// The prospect list: `"{n}. {name} - {company}"`, numbered from 1.
pub fn prospect_list_document(title: impl Into<String>, prospects: &[Prospect]) -> ReportDocument {
    ReportDocument {
        title: title.into(),
        lines: prospects
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{}. {} - {}", i + 1, p.name, p.company))
            .collect(),
    }
}

/// One worksheet: a header row and its data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn from_records<T: TabularRecord>(name: impl Into<String>, records: &[T]) -> Self {
        Self {
            name: name.into(),
            columns: T::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: records.iter().map(TabularRecord::cells).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

/// The marketing report: prospects first, then activities.
pub fn marketing_workbook(prospects: &[Prospect], activities: &[Activity]) -> Workbook {
    Workbook {
        sheets: vec![
            Sheet::from_records(PROSPECT_SHEET, prospects),
            Sheet::from_records(ACTIVITY_SHEET, activities),
        ],
    }
}
