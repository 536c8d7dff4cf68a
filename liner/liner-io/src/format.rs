//! Comma-separated records and float rendering shared by the readers and
//! the case writer.

/// Split one comma-separated record into fields.
///
/// Double-quoted fields may contain commas; `""` inside quotes is a literal
/// quote. Fields are not trimmed.
pub(crate) fn fields(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.trim_end_matches(['\r', '\n']).chars().peekable();

    while let Some(c) = chars.next() {
        match (c, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', true) => quoted = false,
            ('"', false) if field.is_empty() => quoted = true,
            (',', false) => out.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    out.push(field);
    out
}

/// Quote a field if it contains a comma or a quote.
pub(crate) fn quote(field: &str) -> String {
    if field.contains([',', '"']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render a float the way the result files have always shown it.
///
/// Shortest round-trip digits, `.0` on integral values, and scientific
/// notation with a two-digit signed exponent outside `[1e-4, 1e16)`.
///
/// ```text
/// 3.0, 0.125, 1e-05, 1.5e+16, -0.0
/// ```
#[must_use]
pub fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{value:e}");
        return match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = exp
                    .strip_prefix('-')
                    .map_or(("+", exp), |d| ("-", d));
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => sci,
        };
    }
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Parse a float field, reporting `what` on failure.
pub(crate) fn parse_f64(field: &str, line: usize, what: &str) -> crate::IoResult<f64> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|e| crate::IoError::parse(line, format!("{what}: {e} ({field:?})")))
}
