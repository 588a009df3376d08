//! Filter predicate helpers.
//!
//! Convenience methods build their predicates here; caller-supplied
//! filters are only ever combined, never rewritten.

// ============================================================================
// Literals
// ============================================================================

/// Formats `value` as an OData string literal, doubling embedded quotes.
///
/// ```
/// use wfrmls_core::odata::filter::quote;
///
/// assert_eq!(quote("O'Brien"), "'O''Brien'");
/// ```
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `field eq 'value'`
pub fn eq(field: &str, value: &str) -> String {
    format!("{field} eq {}", quote(value))
}

/// `contains(field, 'value')`
pub fn contains(field: &str, value: &str) -> String {
    format!("contains({field}, {})", quote(value))
}

// ============================================================================
// Composition
// ============================================================================

/// Combines a method's filter template with a caller's filter using `and`.
///
/// An absent or blank caller filter yields the template alone. Operands
/// containing a top-level `or` are parenthesized.
pub fn compose(template: &str, caller: Option<&str>) -> String {
    match caller.map(str::trim).filter(|c| !c.is_empty()) {
        Some(caller) => format!("{} and {}", group(template), group(caller)),
        None => template.to_string(),
    }
}

/// Joins predicates with `and`, skipping blank ones.
///
/// Returns `None` if nothing remains.
pub fn and_all<I, S>(predicates: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = predicates
        .into_iter()
        .map(|p| p.as_ref().trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    match parts.as_slice() {
        [] => None,
        [single] => Some(single.clone()),
        _ => Some(parts.iter().map(|p| group(p)).collect::<Vec<_>>().join(" and ")),
    }
}

/// Joins predicates with `or` inside one pair of parentheses.
///
/// Returns `None` if `predicates` is empty.
pub fn any_of<I, S>(predicates: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = predicates
        .into_iter()
        .map(|p| p.as_ref().trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(format!("({})", parts.join(" or ")))
    }
}

fn group(expr: &str) -> String {
    if has_top_level_or(expr) {
        format!("({expr})")
    } else {
        expr.to_string()
    }
}

/// Returns true if `expr` has an ` or ` outside parentheses and string literals.
pub(crate) fn has_top_level_or(expr: &str) -> bool {
    let bytes = expr.as_bytes();
    let mut depth: i32 = 0;
    let mut in_literal = false;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            // Doubled quotes toggle twice and stay inside the literal.
            b'\'' => in_literal = !in_literal,
            b'(' if !in_literal => depth += 1,
            b')' if !in_literal => depth -= 1,
            b' ' if !in_literal && depth == 0 => {
                if bytes.len() >= i + 4
                    && bytes[i + 1..i + 3].eq_ignore_ascii_case(b"or")
                    && bytes[i + 3] == b' '
                {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

// ============================================================================
// Tests
// ============================================================================
