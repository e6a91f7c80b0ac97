//! Crontab alias expansion and 5-field syntax checks.

use serde_json::Value;

use super::ScheduleError;

/// Nonstandard `@` shorthands and their 5-field expansions.
///
/// `@reboot` is absent: it has no periodic form.
pub const ALIASES: &[(&str, &str)] = &[
    ("@yearly", "0 0 1 1 *"),
    ("@annually", "0 0 1 1 *"),
    ("@monthly", "0 0 1 * *"),
    ("@weekly", "0 0 * * 0"),
    ("@daily", "0 0 * * *"),
    ("@hourly", "0 * * * *"),
];

/// Expansion for an exact alias token.
pub fn expand_alias(token: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, expr)| *expr)
}

/// Allowed values for one crontab field.
struct FieldSpec {
    min: u32,
    max: u32,
    /// Symbolic names; `names[i]` stands for `name_base + i`.
    names: &'static [&'static str],
    name_base: u32,
}

const MONTH_NAMES: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];
const WEEKDAY_NAMES: &[&str] = &["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

// minute, hour, day-of-month, month, day-of-week (0 and 7 are both Sunday)
const FIELDS: [FieldSpec; 5] = [
    FieldSpec { min: 0, max: 59, names: &[], name_base: 0 },
    FieldSpec { min: 0, max: 23, names: &[], name_base: 0 },
    FieldSpec { min: 1, max: 31, names: &[], name_base: 0 },
    FieldSpec { min: 1, max: 12, names: MONTH_NAMES, name_base: 1 },
    FieldSpec { min: 0, max: 7, names: WEEKDAY_NAMES, name_base: 0 },
];

impl FieldSpec {
    /// Comma-separated list of `*`, `N` or `N-M`, each optionally `/step`.
    /// Every step lies in `1..=max`, whatever it is attached to.
    fn accepts(&self, field: &str) -> bool {
        field.split(',').all(|item| self.accepts_item(item))
    }

    fn accepts_item(&self, item: &str) -> bool {
        if item.is_empty() {
            return false;
        }

        let range = match item.split_once('/') {
            Some((r, step)) if self.accepts_step(step) => r,
            Some(_) => return false,
            None => item,
        };

        if range == "*" {
            return true;
        }

        match range.split_once('-') {
            Some((lo, hi)) => matches!(
                (self.value(lo), self.value(hi)),
                (Some(lo), Some(hi)) if lo <= hi
            ),
            None => self.value(range).is_some(),
        }
    }

    fn accepts_step(&self, step: &str) -> bool {
        parse_number(step).is_some_and(|s| (1..=self.max).contains(&s))
    }

    fn value(&self, token: &str) -> Option<u32> {
        if let Some(n) = parse_number(token) {
            return (self.min..=self.max).contains(&n).then_some(n);
        }
        self.names
            .iter()
            .position(|name| name.eq_ignore_ascii_case(token))
            .map(|i| self.name_base + i as u32)
    }
}

/// Plain decimal digits only; rejects signs and whitespace that `str::parse` tolerates.
fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Whether `expr` is a syntactically valid 5-field crontab expression.
pub fn is_valid(expr: &str) -> bool {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    fields.len() == FIELDS.len()
        && fields
            .iter()
            .zip(FIELDS.iter())
            .all(|(field, allowed)| allowed.accepts(field))
}

/// Trim, expand aliases, and syntax-check a raw `schedule` value.
///
/// The result has its fields separated by single spaces.
pub(super) fn normalize(raw: &Value) -> Result<String, ScheduleError> {
    let Value::String(raw) = raw else {
        return Err(ScheduleError::InvalidShape);
    };

    let trimmed = raw.trim();
    let expr = if trimmed.starts_with('@') {
        expand_alias(trimmed).ok_or(ScheduleError::NotParseable)?.to_string()
    } else {
        trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
    };

    if !is_valid(&expr) {
        return Err(ScheduleError::NotParseable);
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_expressions() {
        for expr in [
            "* * * * *",
            "*/15 * * * *",
            "0 0 * * 0",
            "0,30 9-17 * * 1-5",
            "5 4 * * sun",
            "0 12 1 jan-jun *",
            "0 0 * * MON-FRI",
            "0 0 * * 7",
            "10-50/10 */2 1,15 * *",
            "5/15 * * * *",
            "0-59/59 * * * *",
            "*/31 * */31 * *",
            "* * * * */7",
        ] {
            assert!(is_valid(expr), "expected valid: {expr}");
        }
    }

    #[test]
    fn invalid_expressions() {
        for expr in [
            "",
            "* * * *",
            "* * * * * *",
            "60 * * * *",
            "* 24 * * *",
            "* * 0 * *",
            "* * * 13 *",
            "* * * * 8",
            "*/0 * * * *",
            "*/60 * * * *",
            "*/100 * * * *",
            "0-59/100 * * * *",
            "5/99 * * * *",
            "* */24 * * *",
            "* * * 1-12/13 *",
            "5-1 * * * *",
            "1,,2 * * * *",
            "+5 * * * *",
            "a * * * *",
            "* * * foo *",
            "* * * * sun-",
            "0 0 L * *",
        ] {
            assert!(!is_valid(expr), "expected invalid: {expr}");
        }
    }

    #[test]
    fn month_names_do_not_apply_to_other_fields() {
        assert!(!is_valid("jan * * * *"));
        assert!(!is_valid("* * * * jan"));
        assert!(!is_valid("* * * mon *"));
    }

    #[test]
    fn steps_are_bounded_the_same_way_in_every_form() {
        for step in ["*/", "0-59/", "5/"] {
            assert!(is_valid(&format!("{step}59 * * * *")), "{step}59");
            assert!(!is_valid(&format!("{step}60 * * * *")), "{step}60");
        }
    }

    #[test]
    fn normalize_collapses_inner_whitespace() {
        let expr = normalize(&Value::String("0  0\n*\t* *".to_string())).unwrap();
        assert_eq!(expr, "0 0 * * *");
        assert_eq!(normalize(&Value::String(expr.clone())).unwrap(), expr);
    }

    #[test]
    fn alias_lookup_is_exact() {
        assert_eq!(expand_alias("@daily"), Some("0 0 * * *"));
        assert_eq!(expand_alias("@Daily"), None);
        assert_eq!(expand_alias("@reboot"), None);
    }

    #[test]
    fn every_alias_expands_to_a_valid_expression() {
        for (alias, expr) in ALIASES {
            assert!(is_valid(expr), "{alias} -> {expr}");
        }
    }
}
