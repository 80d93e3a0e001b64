//! Listing records, pages and the assembled catalog

use serde::{Deserialize, Serialize};

/// A single property listing
///
/// Records are immutable once fetched. The pipeline moves each record into the
/// task that downloads its photo, so no two tasks ever share one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique key within the catalog
    pub id: u64,

    /// Free-form street address
    pub address: String,

    /// Owner name, may be empty
    pub owner_name: String,

    /// Asking price (carried but unused by the pipeline)
    pub price: i64,

    /// Absolute URL of the listing photo
    pub photo_url: String,
}

impl Record {
    /// Create a record from its fields
    pub fn new(
        id: u64,
        address: impl Into<String>,
        owner_name: impl Into<String>,
        price: i64,
        photo_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            address: address.into(),
            owner_name: owner_name.into(),
            price,
            photo_url: photo_url.into(),
        }
    }
}

/// One page of records as returned by a single fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-indexed page number
    pub number: u32,

    /// Records in API order
    pub records: Vec<Record>,
}

impl Page {
    pub fn new(number: u32, records: Vec<Record>) -> Self {
        Self { number, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// All fetched records, in page order then within-page order
///
/// Built incrementally during the fetch phase and consumed whole by the
/// download phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<Record>,
    pages: u32,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page; pages must arrive in order
    pub fn push_page(&mut self, page: Page) {
        self.pages += 1;
        debug_assert_eq!(page.number, self.pages, "pages appended out of order");
        self.records.extend(page.records);
    }

    /// Number of pages appended so far
    pub fn page_count(&self) -> u32 {
        self.pages
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hand the records over to the download phase
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
