//! Entity references found in heading text.

/// Decode an entity reference name (without `&` and `;`) to its text.
///
/// Handles the XML entities, numeric references and the named HTML entities
/// that commonly show up in headings. Unknown entities are kept verbatim.
pub(crate) fn decode_entity(entity: &str) -> String {
    if let Some(numeric) = entity.strip_prefix('#') {
        let code = if let Some(hex) = numeric
            .strip_prefix('x')
            .or_else(|| numeric.strip_prefix('X'))
        {
            u32::from_str_radix(hex, 16).ok()
        } else {
            numeric.parse::<u32>().ok()
        };
        return code
            .and_then(char::from_u32)
            .map_or_else(|| format!("&{entity};"), |c| c.to_string());
    }

    named_entity(entity).map_or_else(|| format!("&{entity};"), str::to_owned)
}

fn named_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        "apos" => "'",
        "quot" => "\"",
        "nbsp" => "\u{00a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "hellip" => "\u{2026}",
        "rarr" => "\u{2192}",
        "larr" => "\u{2190}",
        "para" => "\u{00b6}",
        "sect" => "\u{00a7}",
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        _ => return None,
    })
}
