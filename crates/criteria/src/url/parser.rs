//! URL query parameters to criteria.
//!
//! # Grammar
//!
//! ```text
//! filters[<index>][field|operator|value]=...
//! orders[<index>][field|direction]=...
//! page_size=...
//! page_number=...
//! ```
//!
//! `<index>` is an integer in `0..100`. Groups are collected by index and
//! emitted in ascending index order; gaps are fine. Keys outside the grammar
//! (malformed or nested brackets, empty index, unknown subkeys, unrelated
//! parameters) are ignored. A repeated `(index, subkey)` keeps the last
//! value.

use std::collections::BTreeMap;

use tracing::{debug, trace};
use url::form_urlencoded;

use crate::error::{CriteriaResult, IntegrityError};
use crate::guards;
use crate::model::{
    Criteria, Direction, FieldKind, Filter, Operator, Order, Pagination, Value,
};

/// Exclusive upper bound for group indices.
pub const MAX_GROUP_INDEX: usize = 100;

/// Options for [`UrlToCriteriaConverter`].
#[derive(Debug, Clone, Default)]
pub struct UrlConvertOptions {
    /// Raw field name to canonical field name.
    pub fields_mapping: BTreeMap<String, String>,

    /// Check raw filter and order fields against `valid_fields`.
    pub check_field_injection: bool,
    /// Allowed raw field names.
    pub valid_fields: Vec<String>,

    /// Check operators against `valid_operators`.
    pub check_operator_injection: bool,
    /// Allowed operators.
    pub valid_operators: Vec<Operator>,

    /// Check directions against `valid_directions`.
    pub check_direction_injection: bool,
    /// Allowed directions.
    pub valid_directions: Vec<Direction>,

    /// Check pagination against the maxima.
    pub check_pagination_bounds: bool,
    /// Largest accepted page size.
    pub max_page_size: Option<u64>,
    /// Largest accepted page number.
    pub max_page_number: Option<u64>,
}

impl UrlConvertOptions {
    /// Adds one raw-to-canonical field mapping.
    pub fn with_field_mapping(
        mut self,
        raw: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Self {
        self.fields_mapping.insert(raw.into(), canonical.into());
        self
    }

    /// Enables the field check with the given whitelist.
    pub fn with_valid_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check_field_injection = true;
        self.valid_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Enables the operator check with the given whitelist.
    pub fn with_valid_operators(mut self, operators: impl IntoIterator<Item = Operator>) -> Self {
        self.check_operator_injection = true;
        self.valid_operators = operators.into_iter().collect();
        self
    }

    /// Enables the direction check with the given whitelist.
    pub fn with_valid_directions(
        mut self,
        directions: impl IntoIterator<Item = Direction>,
    ) -> Self {
        self.check_direction_injection = true;
        self.valid_directions = directions.into_iter().collect();
        self
    }

    /// Enables pagination bounds.
    pub fn with_pagination_bounds(
        mut self,
        max_page_size: Option<u64>,
        max_page_number: Option<u64>,
    ) -> Self {
        self.check_pagination_bounds = true;
        self.max_page_size = max_page_size;
        self.max_page_number = max_page_number;
        self
    }

    fn mapped(&self, field: &str) -> String {
        self.fields_mapping
            .get(field)
            .cloned()
            .unwrap_or_else(|| field.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    Filters,
    Orders,
}

impl Collection {
    fn kind(&self) -> FieldKind {
        match self {
            Collection::Filters => FieldKind::Filter,
            Collection::Orders => FieldKind::Order,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Collection::Filters => "filters",
            Collection::Orders => "orders",
        }
    }

    fn accepts(&self, subkey: &str) -> bool {
        match self {
            Collection::Filters => matches!(subkey, "field" | "operator" | "value"),
            Collection::Orders => matches!(subkey, "field" | "direction"),
        }
    }
}

/// Splits `filters[0][field]` into its parts, or `None` if the key is
/// outside the grammar.
fn parse_group_key(key: &str) -> Option<(Collection, &str, &str)> {
    let (collection, rest) = if let Some(rest) = key.strip_prefix("filters[") {
        (Collection::Filters, rest)
    } else if let Some(rest) = key.strip_prefix("orders[") {
        (Collection::Orders, rest)
    } else {
        return None;
    };

    let (index, rest) = rest.split_once(']')?;
    let subkey = rest.strip_prefix('[')?.strip_suffix(']')?;

    if index.is_empty() || index.contains('[') || subkey.contains(['[', ']']) {
        return None;
    }
    Some((collection, index, subkey))
}

/// Raw subkey values of one indexed group.
#[derive(Debug, Default)]
struct RawGroup {
    values: BTreeMap<String, String>,
}

impl RawGroup {
    fn require(
        &self,
        kind: FieldKind,
        group: &str,
        subkey: &'static str,
    ) -> Result<&str, IntegrityError> {
        self.values
            .get(subkey)
            .map(String::as_str)
            .ok_or_else(|| IntegrityError::MissingSubkey {
                kind,
                group: group.to_string(),
                subkey,
            })
    }
}

/// Everything read from the query string, before validation.
#[derive(Debug, Default)]
struct RawQuery {
    filters: BTreeMap<usize, RawGroup>,
    orders: BTreeMap<usize, RawGroup>,
    page_size: Option<String>,
    page_number: Option<String>,
}

impl RawQuery {
    fn parse(query: &str) -> Result<Self, IntegrityError> {
        let mut raw = RawQuery::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "page_size" => raw.page_size = Some(value.into_owned()),
                "page_number" => raw.page_number = Some(value.into_owned()),
                key => {
                    let Some((collection, index, subkey)) = parse_group_key(key) else {
                        trace!(key = %key, "ignoring query parameter");
                        continue;
                    };
                    if !collection.accepts(subkey) {
                        trace!(key = %key, "ignoring unknown subkey");
                        continue;
                    }

                    let group = format!("{}[{}]", collection.name(), index);
                    let index = parse_index(index).ok_or_else(|| IntegrityError::IndexNotInteger {
                        kind: collection.kind(),
                        group: group.clone(),
                    })?;
                    if index >= MAX_GROUP_INDEX {
                        return Err(IntegrityError::IndexExceedsLimit {
                            kind: collection.kind(),
                            group,
                            limit: MAX_GROUP_INDEX,
                        });
                    }

                    let groups = match collection {
                        Collection::Filters => &mut raw.filters,
                        Collection::Orders => &mut raw.orders,
                    };
                    groups
                        .entry(index)
                        .or_default()
                        .values
                        .insert(subkey.to_string(), value.into_owned());
                }
            }
        }

        Ok(raw)
    }
}

/// Returns true for an optionally signed run of ASCII digits.
fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a group index. Integers too large for `usize` saturate so they
/// fail the limit check rather than the integer check.
fn parse_index(raw: &str) -> Option<usize> {
    match raw.parse::<usize>() {
        Ok(index) => Some(index),
        Err(_) if is_integer_literal(raw) && !raw.starts_with('-') => Some(usize::MAX),
        Err(_) => None,
    }
}

/// Coerces one raw scalar: booleans, then null, then integer, then finite
/// float, else the string itself. Integer literals outside the `i64` range
/// stay strings so no digits are lost.
pub fn coerce_scalar(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if raw.eq_ignore_ascii_case("null") || raw.eq_ignore_ascii_case("none") {
        return Value::Null;
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Integer(i);
    }
    if is_integer_literal(raw) {
        return Value::String(raw.to_string());
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::Float(f),
        _ => Value::String(raw.to_string()),
    }
}

/// Coerces a raw filter value according to its operator.
fn coerce_filter_value(
    group: &str,
    operator: Operator,
    raw: &str,
) -> Result<Value, IntegrityError> {
    let invalid = || IntegrityError::InvalidValue {
        group: group.to_string(),
        value: raw.to_string(),
        operator,
    };

    if operator.is_null_check() {
        return Ok(Value::Null);
    }

    if operator.is_range() {
        let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
        if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }
        return Ok(Value::List(parts.into_iter().map(coerce_scalar).collect()));
    }

    if operator.is_membership() {
        let parts: Vec<Value> = raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(coerce_scalar)
            .collect();
        if parts.is_empty() {
            return Err(invalid());
        }
        return Ok(Value::List(parts));
    }

    Ok(coerce_scalar(raw))
}

/// Returns the query component of a URL-like string, without the fragment.
fn query_component(url: &str) -> &str {
    let url = url.split_once('#').map_or(url, |(before, _)| before);
    url.split_once('?').map_or("", |(_, query)| query)
}

/// Parses indexed query parameters into a flat [`Criteria`].
///
/// ```rust
/// use criteria_pattern::{UrlConvertOptions, UrlToCriteriaConverter, Value};
///
/// let url = "https://api.example.com/users?filters[0][field]=age&filters[0][operator]=BETWEEN&filters[0][value]=18,30";
/// let criteria = UrlToCriteriaConverter::convert(url, &UrlConvertOptions::default())?;
/// assert_eq!(criteria.filters()[0].value(), &Value::from((18, 30)));
/// # Ok::<(), criteria_pattern::CriteriaError>(())
/// ```
pub struct UrlToCriteriaConverter;

impl UrlToCriteriaConverter {
    /// Parses the query string of `url`.
    ///
    /// Structural errors come first, in group order; then the enabled
    /// injection checks run on the raw field names; then the criteria is
    /// built with mapped field names.
    pub fn convert(url: &str, options: &UrlConvertOptions) -> CriteriaResult<Criteria> {
        let raw = RawQuery::parse(query_component(url))?;

        let mut filters = Vec::with_capacity(raw.filters.len());
        for (index, group) in &raw.filters {
            let label = format!("filters[{}]", index);
            let field = group.require(FieldKind::Filter, &label, "field")?;
            let operator = group.require(FieldKind::Filter, &label, "operator")?;
            let value = group.require(FieldKind::Filter, &label, "value")?;

            let operator: Operator =
                operator
                    .parse()
                    .map_err(|_| IntegrityError::UnsupportedOperator {
                        group: label.clone(),
                        operator: operator.to_string(),
                    })?;
            let value = coerce_filter_value(&label, operator, value)?;
            filters.push((field, operator, value));
        }

        let mut orders = Vec::with_capacity(raw.orders.len());
        for (index, group) in &raw.orders {
            let label = format!("orders[{}]", index);
            let field = group.require(FieldKind::Order, &label, "field")?;
            let direction = group.require(FieldKind::Order, &label, "direction")?;

            let direction: Direction =
                direction
                    .parse()
                    .map_err(|_| IntegrityError::UnsupportedDirection {
                        group: label.clone(),
                        direction: direction.to_string(),
                    })?;
            orders.push((field, direction));
        }

        let page_size = match &raw.page_size {
            Some(value) => Some(value.trim().parse::<i64>().map_err(|_| {
                IntegrityError::PageSizeNotInteger {
                    value: value.clone(),
                }
            })?),
            None => None,
        };
        let page_number = match (&raw.page_number, page_size) {
            (Some(value), None) => {
                return Err(IntegrityError::PageNumberWithoutPageSize {
                    page_number: value.clone(),
                }
                .into());
            }
            (Some(value), Some(_)) => Some(value.trim().parse::<i64>().map_err(|_| {
                IntegrityError::PageNumberNotInteger {
                    value: value.clone(),
                }
            })?),
            (None, _) => None,
        };
        let pagination = Pagination::new(page_size, page_number)?;

        if options.check_field_injection {
            for (field, _, _) in &filters {
                guards::check_column(field, &options.valid_fields)?;
            }
            for (field, _) in &orders {
                guards::check_column(field, &options.valid_fields)?;
            }
        }
        if options.check_operator_injection {
            for (_, operator, _) in &filters {
                guards::check_operator(*operator, &options.valid_operators)?;
            }
        }
        if options.check_direction_injection {
            for (_, direction) in &orders {
                guards::check_direction(*direction, &options.valid_directions)?;
            }
        }
        if options.check_pagination_bounds {
            guards::check_pagination_bounds(
                pagination,
                options.max_page_size,
                options.max_page_number,
            )?;
        }

        let filters = filters
            .into_iter()
            .map(|(field, operator, value)| Filter::new(options.mapped(field), operator, value))
            .collect::<Result<Vec<_>, _>>()?;
        let orders = orders
            .into_iter()
            .map(|(field, direction)| Order::new(options.mapped(field), direction))
            .collect::<Result<Vec<_>, _>>()?;

        let criteria = Criteria::new(filters, orders, page_size, page_number)?;
        debug!(
            filters = criteria.filters().len(),
            orders = criteria.orders().len(),
            paginated = criteria.has_pagination(),
            "parsed criteria from URL"
        );
        Ok(criteria)
    }
}
