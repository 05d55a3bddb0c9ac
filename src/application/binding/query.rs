use crate::application::{
    error::{ApplicationError, ApplicationResult, FieldViolation},
    queries::articles::ListArticlesQuery,
};
use crate::domain::article::{
    ArticleField, ArticleFilter, FieldSelection, ListCursor, SortDirection, SortField, SortKey,
};
use std::collections::BTreeSet;

pub const DEFAULT_PAGE: u32 = 1;
pub const MAX_PAGE: u32 = 30;
pub const DEFAULT_LIMIT: u32 = 30;
pub const MAX_LIMIT: u32 = 100;

/// Binds raw `(name, value)` query pairs. Later duplicates win and unknown
/// names are ignored.
pub fn bind_list_query(pairs: &[(String, String)]) -> ApplicationResult<ListArticlesQuery> {
    let param = |name: &str| {
        pairs
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    };

    let mut violations = Vec::new();

    let filter = param("q").map(ArticleFilter::keywords).unwrap_or_default();
    let selection = collect(param("fields").map(parse_selection), &mut violations)
        .unwrap_or_default();
    let page = collect(
        param("page").map(|raw| parse_bounded("page", raw, MAX_PAGE)),
        &mut violations,
    )
    .unwrap_or(DEFAULT_PAGE);
    let limit = collect(
        param("limit").map(|raw| parse_bounded("limit", raw, MAX_LIMIT)),
        &mut violations,
    )
    .unwrap_or(DEFAULT_LIMIT);
    let sort = collect(param("sort").map(parse_sort), &mut violations)
        .unwrap_or_else(|| ListCursor::default().sort);

    if !violations.is_empty() {
        return Err(ApplicationError::Validation(violations));
    }

    Ok(ListArticlesQuery {
        filter,
        selection,
        cursor: ListCursor { page, limit, sort },
    })
}

fn collect<T>(
    parsed: Option<Result<T, FieldViolation>>,
    violations: &mut Vec<FieldViolation>,
) -> Option<T> {
    match parsed? {
        Ok(value) => Some(value),
        Err(violation) => {
            violations.push(violation);
            None
        }
    }
}

fn parse_bounded(name: &str, raw: &str, max: u32) -> Result<u32, FieldViolation> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| FieldViolation::new(name, format!("{name} must be an integer")))?;
    if value < 1 || value > i64::from(max) {
        return Err(FieldViolation::new(
            name,
            format!("{name} must be between 1 and {max}"),
        ));
    }
    u32::try_from(value).map_err(|_| FieldViolation::new(name, format!("{name} is out of range")))
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|part| !part.is_empty())
}

fn parse_selection(raw: &str) -> Result<FieldSelection, FieldViolation> {
    let mut included = BTreeSet::new();
    let mut excluded = BTreeSet::new();

    for part in split_list(raw) {
        let (name, target) = match part.strip_prefix('-') {
            Some(name) => (name, &mut excluded),
            None => (part, &mut included),
        };
        let field = name
            .parse::<ArticleField>()
            .map_err(|_| FieldViolation::new("fields", format!("unknown field '{name}'")))?;
        target.insert(field);
    }

    match (included.is_empty(), excluded.is_empty()) {
        (true, true) => Ok(FieldSelection::All),
        (false, true) => Ok(FieldSelection::Include(included)),
        (true, false) => Ok(FieldSelection::Exclude(excluded)),
        (false, false) => Err(FieldViolation::new(
            "fields",
            "fields cannot mix inclusions and exclusions",
        )),
    }
}

fn parse_sort(raw: &str) -> Result<Vec<SortKey>, FieldViolation> {
    let keys = split_list(raw)
        .map(|part| {
            let (direction, name) = if let Some(name) = part.strip_prefix('-') {
                (SortDirection::Desc, name)
            } else if let Some(name) = part.strip_prefix('+') {
                (SortDirection::Asc, name)
            } else {
                (SortDirection::Asc, part)
            };
            name.parse::<SortField>()
                .map(|field| SortKey::new(field, direction))
                .map_err(|_| FieldViolation::new("sort", format!("cannot sort by '{name}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if keys.is_empty() {
        return Err(FieldViolation::new("sort", "sort cannot be empty"));
    }
    Ok(keys)
}
