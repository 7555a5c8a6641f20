use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One company as extracted from a listing entry. Only the name is
/// guaranteed; every other field may be missing on the source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub employee_count: Option<u64>,
    pub sector: Option<String>,
    pub headquarters: Option<String>,
    pub website_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
}

/// What one listing page yielded: its records in document order, plus the
/// total page count the site's pagination nav advertises, when present.
#[derive(Debug, Default)]
pub struct PageResult {
    pub records: Vec<CompanyRecord>,
    pub total_pages: Option<usize>,
}

/// The accumulated run output, owned by the driver until it is serialized
/// once at the end.
#[derive(Debug, Serialize)]
pub struct Dataset {
    pub records: Vec<CompanyRecord>,
    pub pages_processed: usize,
    pub pages_failed: usize,
    pub scraped_at: DateTime<Utc>,
}

impl Dataset {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            pages_processed: 0,
            pages_failed: 0,
            scraped_at: Utc::now(),
        }
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}
