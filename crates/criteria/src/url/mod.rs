//! Conversion between URL query parameters and criteria.
//!
//! [`UrlToCriteriaConverter`] reads indexed `filters[i][...]` and
//! `orders[i][...]` parameters plus `page_size` / `page_number`;
//! [`CriteriaToUrlConverter`] writes the same shape back for flat criteria.

mod encoder;
mod parser;

pub use encoder::CriteriaToUrlConverter;
pub use parser::{MAX_GROUP_INDEX, UrlConvertOptions, UrlToCriteriaConverter, coerce_scalar};
