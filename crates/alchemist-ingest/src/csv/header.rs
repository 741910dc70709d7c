//! CSV header normalization and resolution to canonical field names.

use std::collections::HashSet;

use alchemist_model::Entity;

/// Normalizes a header value by trimming whitespace and a stray BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim_matches('\u{feff}').trim().to_string()
}

/// Maps a raw header to the entity's canonical field name.
///
/// Matching ignores case, spaces, underscores and hyphens. An exact match
/// wins; otherwise the first known field that contains, or is contained in,
/// the header is used. Unmatched headers are kept as normalized.
pub fn resolve_header(raw: &str, entity: Entity) -> String {
    resolve_headers([raw], entity).pop().unwrap_or_default()
}

/// Resolves a whole header row so that every column gets a distinct name.
///
/// Exact matches claim their canonical field first, in column order.
/// Substring matches only take fields no earlier header has claimed, so
/// `TaskID,Task` never maps both columns to `TaskID`. A name that is still
/// taken gets a numeric suffix (`TaskID_1`). Blank headers stay blank.
pub fn resolve_headers<'a, I>(raw: I, entity: Entity) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let normalized: Vec<String> = raw.into_iter().map(normalize_header).collect();
    let keys: Vec<String> = normalized.iter().map(|header| fold(header)).collect();
    let fields = entity.known_fields();
    let mut claimed: HashSet<&'static str> = HashSet::new();
    let mut resolved: Vec<Option<&'static str>> = vec![None; normalized.len()];

    for (slot, key) in resolved.iter_mut().zip(&keys) {
        if key.is_empty() {
            continue;
        }
        if let Some(field) = fields.iter().find(|field| fold(field) == *key)
            && claimed.insert(*field)
        {
            *slot = Some(*field);
        }
    }

    for (slot, key) in resolved.iter_mut().zip(&keys) {
        if slot.is_some() || key.is_empty() {
            continue;
        }
        let partial = fields.iter().find(|field| {
            let candidate = fold(field);
            !claimed.contains(*field) && (candidate.contains(key) || key.contains(&candidate))
        });
        if let Some(field) = partial {
            claimed.insert(*field);
            *slot = Some(*field);
        }
    }

    let mut taken: HashSet<String> = HashSet::new();
    resolved
        .into_iter()
        .zip(normalized)
        .map(|(field, header)| {
            let name = field.map_or(header, str::to_string);
            if name.is_empty() {
                name
            } else {
                unique_name(name, &mut taken)
            }
        })
        .collect()
}

fn unique_name(name: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(name.clone()) {
        return name;
    }
    let mut suffix = 1;
    loop {
        let candidate = format!("{name}_{suffix}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        suffix += 1;
    }
}

fn fold(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}
