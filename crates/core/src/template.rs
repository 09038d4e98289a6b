//! Text templating: placeholder substitution and property-block parsing.
//!
//! Templates use `$KEY$` placeholders. Substitution is a single pass over
//! the template text, so values are inserted as literal text and never
//! re-expanded. Any `$UPPER_CASE$`-shaped token left unmatched after the
//! pass is erased; templates may anticipate more variables than a given
//! run supplies, and none may leak into published artifacts.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A `$KEY$` token. Broader than the residue shape so that supplied
    /// lowercase or digit-bearing keys are matched case-sensitively.
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\$([A-Za-z0-9_]+)\$").expect("placeholder regex is valid");

    /// A `KEY=` assignment at the start of a property line.
    static ref PROPERTY_LINE: Regex =
        Regex::new(r"^([A-Z_][A-Z0-9_]*)=(.*)$").expect("property regex is valid");
}

/// Replace every `$KEY$` placeholder with its value from `variables`,
/// then erase any remaining `$[A-Z_]+$`-shaped token.
pub fn substitute(template: &str, variables: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            let key = &caps[1];
            if let Some(value) = variables.get(key) {
                return value.clone();
            }
            if key.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
                // Unknown placeholder the template anticipated; elide it.
                return String::new();
            }
            caps[0].to_string()
        })
        .into_owned()
}

/// Extract `KEY="value"` assignments from a property block.
///
/// Keys match `[A-Z_][A-Z0-9_]*`. Quotes are optional and stripped when
/// present. A quoted value may span multiple lines and is terminated by a
/// line ending in a closing quote (or end of input). Lines that do not
/// parse as assignments are dropped without emitting partial keys.
pub fn parse_properties(text: &str) -> HashMap<String, String> {
    let mut properties = HashMap::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let Some(caps) = PROPERTY_LINE.captures(line) else {
            continue;
        };
        let key = caps[1].to_string();
        let rest = &caps[2];

        let value = match rest.strip_prefix('"') {
            None => rest.to_string(),
            Some(inner) => match inner.strip_suffix('"') {
                Some(single_line) if !inner.is_empty() => single_line.to_string(),
                _ => {
                    // Opening quote without a closer on this line: the
                    // value continues until a line ending in `"` or EOF.
                    let mut value = inner.to_string();
                    for continuation in lines.by_ref() {
                        match continuation.strip_suffix('"') {
                            Some(tail) => {
                                if !tail.is_empty() {
                                    value.push('\n');
                                    value.push_str(tail);
                                }
                                break;
                            }
                            None => {
                                value.push('\n');
                                value.push_str(continuation);
                            }
                        }
                    }
                    value
                }
            },
        };

        properties.insert(key, value);
    }

    properties
}
