/// Strips whitespace, hyphens, parentheses, and periods from a phone number.
///
/// The result is only ever used as a comparison key; the raw value as
/// submitted is what gets stored.
pub fn normalize_phone(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_whitespace() && !matches!(ch, '-' | '(' | ')' | '.'))
        .collect()
}

/// Accepts 7+ characters drawn from digits, whitespace, hyphens, parentheses,
/// periods, and a leading plus sign. Covers +17744153244, +1 774 415 3244,
/// 774-415-3244, (774) 415-3244, and similar.
pub fn is_valid_phone(value: &str) -> bool {
    if value.chars().count() < 7 {
        return false;
    }

    value.chars().enumerate().all(|(i, ch)| {
        ch.is_ascii_digit()
            || ch.is_whitespace()
            || matches!(ch, '-' | '(' | ')' | '.')
            || (ch == '+' && i == 0)
    })
}

/// Basic `local@domain.tld` shape: at least one character before the `@`, at
/// least one between the `@` and the last `.`, at least one after it, no
/// whitespace anywhere, exactly one `@`.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
