//! Page size, page number and their combination.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Number of rows per page, at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct PageSize(u64);

impl PageSize {
    /// Creates a page size, rejecting values below 1.
    pub fn new(value: i64) -> ModelResult<Self> {
        match u64::try_from(value) {
            Ok(v) if v >= 1 => Ok(Self(v)),
            _ => Err(ModelError::InvalidPageSize { value }),
        }
    }

    /// Returns the page size.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// One-based page index, at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct PageNumber(u64);

impl PageNumber {
    /// Creates a page number, rejecting values below 1.
    pub fn new(value: i64) -> ModelResult<Self> {
        match u64::try_from(value) {
            Ok(v) if v >= 1 => Ok(Self(v)),
            _ => Err(ModelError::InvalidPageNumber { value }),
        }
    }

    /// Returns the page number.
    pub fn get(&self) -> u64 {
        self.0
    }
}

macro_rules! impl_page_conversions {
    ($($ty:ident),*) => {
        $(
            impl TryFrom<i64> for $ty {
                type Error = ModelError;

                fn try_from(value: i64) -> Result<Self, Self::Error> {
                    $ty::new(value)
                }
            }

            impl From<$ty> for u64 {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }
        )*
    };
}

impl_page_conversions!(PageSize, PageNumber);

/// Resolved pagination of a criteria.
///
/// A page number is only meaningful together with a page size, so the type
/// always carries a size; the number is optional (LIMIT without OFFSET).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
    /// Rows per page.
    pub page_size: PageSize,
    /// One-based page, if an offset applies.
    pub page_number: Option<PageNumber>,
}

impl Pagination {
    /// Builds pagination from optional raw values.
    ///
    /// Returns `Ok(None)` when neither value is given and an error when only
    /// a page number is given.
    pub fn new(page_size: Option<i64>, page_number: Option<i64>) -> ModelResult<Option<Self>> {
        let page_size = page_size.map(PageSize::new).transpose()?;
        let page_number = page_number.map(PageNumber::new).transpose()?;

        match (page_size, page_number) {
            (Some(page_size), page_number) => Ok(Some(Self {
                page_size,
                page_number,
            })),
            (None, Some(number)) => Err(ModelError::PageNumberWithoutPageSize {
                page_number: number.get() as i64,
            }),
            (None, None) => Ok(None),
        }
    }

    /// Returns the LIMIT value.
    pub fn limit(&self) -> u64 {
        self.page_size.get()
    }

    /// Returns the OFFSET value, `(page_number - 1) * page_size`, when a page
    /// number is present.
    pub fn offset(&self) -> Option<u64> {
        self.page_number
            .map(|n| (n.get() - 1).saturating_mul(self.page_size.get()))
    }
}
