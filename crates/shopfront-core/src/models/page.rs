use serde::{Deserialize, Serialize};

/// Page size used when none is requested
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page size the backend accepts (it rejects 200 and above)
pub const MAX_PAGE_SIZE: u32 = 199;

/// Paginated collection envelope.
///
/// `pageable` and `sort` are sent by the backend but carry nothing the
/// client uses, so they are not modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
    pub size: u32,
    #[serde(default)]
    pub first: Option<bool>,
    #[serde(default)]
    pub last: Option<bool>,
    #[serde(default)]
    pub number_of_elements: Option<u32>,
    #[serde(default)]
    pub empty: Option<bool>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        match self.last {
            Some(last) => !last,
            None => self.number.saturating_add(1) < self.total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        match self.first {
            Some(first) => !first,
            None => self.number > 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty.unwrap_or(self.content.is_empty())
    }
}

/// Which page of a listing to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    pub fn is_valid(&self) -> bool {
        (1..=MAX_PAGE_SIZE).contains(&self.size)
    }

    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            size: self.size,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}
