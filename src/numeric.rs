//! Numeric interpretation of CSV field values.
//!
//! Fields have no inherent type; this module is the collaborator that turns a
//! field's text into a number for summation. A value parses either as a plain
//! number or as a US-currency amount: an optional `$` symbol, thousands
//! separators, and either a leading minus sign or parentheses for negatives
//! (`($1,234.56)` is -1234.56).

/// Parse a field value as a plain number, falling back to US-currency form.
///
/// Returns `None` when the value fits neither; the caller owns turning that
/// into an error with column context.
pub fn parse_amount(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    if let Ok(amount) = trimmed.parse::<f64>() {
        return Some(amount);
    }

    parse_currency(trimmed)
}

/// Parse a US-currency amount: `$1,234.56`, `-$12.34`, `$-12.34`,
/// `($1,234.56)`. The currency symbol and thousands separators are optional;
/// the remainder must be a plain decimal number.
fn parse_currency(value: &str) -> Option<f64> {
    let mut body = value;
    let mut negative = false;

    // Parenthesized amounts are negative; the parens replace a sign
    if let Some(inner) = body
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        negative = true;
        body = inner.trim();
    }

    // Sign may precede or follow the currency symbol
    if let Some(rest) = body.strip_prefix('-') {
        if negative {
            return None;
        }
        negative = true;
        body = rest;
    }
    body = body.strip_prefix('$').unwrap_or(body);
    if let Some(rest) = body.strip_prefix('-') {
        if negative {
            return None;
        }
        negative = true;
        body = rest;
    }

    if body.is_empty() || body.starts_with('-') || body.starts_with('+') {
        return None;
    }

    let digits: String = body.chars().filter(|&c| c != ',').collect();

    // Reject separator-only bodies like "$,"
    if digits.is_empty() {
        return None;
    }

    let amount = digits.parse::<f64>().ok()?;
    Some(if negative { -amount } else { amount })
}
