//! Flat criteria to URL query parameters.

use tracing::debug;
use url::form_urlencoded;

use super::parser::coerce_scalar;
use crate::error::{CriteriaResult, IntegrityError};
use crate::model::{Criteria, Value};

/// Renders a flat [`Criteria`] as indexed query parameters, in the form
/// [`UrlToCriteriaConverter`](super::UrlToCriteriaConverter) reads.
pub struct CriteriaToUrlConverter;

impl CriteriaToUrlConverter {
    /// Appends the criteria's parameters to `base_url`.
    ///
    /// Composite criteria have no URL form and are rejected, as are values
    /// that would read back as something else: strings that look like
    /// numbers, booleans or null, non-finite floats, and list elements that
    /// are empty, padded with whitespace or contain a comma.
    pub fn convert(criteria: &Criteria, base_url: &str) -> CriteriaResult<String> {
        let leaf = criteria.as_leaf().ok_or(IntegrityError::NotFlat)?;

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (index, filter) in leaf.filters().iter().enumerate() {
            let value = encode_filter_value(&format!("filters[{}]", index), filter.value())?;
            serializer.append_pair(&format!("filters[{}][field]", index), filter.field());
            serializer.append_pair(
                &format!("filters[{}][operator]", index),
                filter.operator().as_str(),
            );
            serializer.append_pair(&format!("filters[{}][value]", index), &value);
        }
        for (index, order) in leaf.orders().iter().enumerate() {
            serializer.append_pair(&format!("orders[{}][field]", index), order.field());
            serializer.append_pair(
                &format!("orders[{}][direction]", index),
                order.direction().as_str(),
            );
        }
        if let Some(pagination) = leaf.pagination() {
            serializer.append_pair("page_size", &pagination.page_size.get().to_string());
            if let Some(number) = pagination.page_number {
                serializer.append_pair("page_number", &number.get().to_string());
            }
        }
        let query = serializer.finish();

        let url = if query.is_empty() {
            base_url.to_string()
        } else if base_url.contains('?') {
            format!("{}&{}", base_url, query)
        } else {
            format!("{}?{}", base_url, query)
        };
        debug!(url = %url, "encoded criteria as URL");
        Ok(url)
    }
}

fn encode_filter_value(group: &str, value: &Value) -> Result<String, IntegrityError> {
    let unencodable = |reason: &'static str| IntegrityError::UnencodableValue {
        group: group.to_string(),
        value: value.to_string(),
        reason,
    };

    let Value::List(items) = value else {
        return encode_scalar(value)
            .ok_or_else(|| unencodable("it would be read back as a different value"));
    };
    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        let part = encode_scalar(item)
            .ok_or_else(|| unencodable("an element would be read back as a different value"))?;
        if part.is_empty() || part.contains(',') || part.trim() != part {
            return Err(unencodable(
                "list elements must be non-empty, trimmed and free of commas",
            ));
        }
        parts.push(part);
    }
    Ok(parts.join(","))
}

/// Renders a scalar, or `None` if parsing the text back yields another value.
fn encode_scalar(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => format!("{:?}", f),
        Value::String(s) => s.clone(),
        Value::List(_) => return None,
    };
    (coerce_scalar(&text) == *value).then_some(text)
}
