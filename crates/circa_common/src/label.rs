//! Turning free-form user labels into legal HDL identifiers.

/// Prefix prepended to labels that start with a digit.
pub const DIGIT_PREFIX: &str = "L_";

/// Converts a user label into an identifier legal in both VHDL and Verilog.
///
/// Every character that is not an ASCII letter, digit or underscore becomes
/// `_`, and a label starting with a digit gets the [`DIGIT_PREFIX`]. The
/// transform is pure, so the same label always yields the same identifier.
/// An empty label stays empty.
pub fn correct_label(label: &str) -> String {
    if label.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(label.len() + DIGIT_PREFIX.len());
    if label.starts_with(|c: char| c.is_ascii_digit()) {
        out.push_str(DIGIT_PREFIX);
    }
    out.extend(label.chars().map(|c| {
        if c.is_ascii_alphanumeric() || c == '_' {
            c
        } else {
            '_'
        }
    }));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_label_unchanged() {
        assert_eq!(correct_label("data_in"), "data_in");
    }

    #[test]
    fn spaces_and_dashes_replaced() {
        assert_eq!(correct_label("carry in-1"), "carry_in_1");
    }

    #[test]
    fn leading_digit_prefixed() {
        assert_eq!(correct_label("7seg"), "L_7seg");
    }

    #[test]
    fn non_ascii_replaced() {
        assert_eq!(correct_label("größe"), "gr__e");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(correct_label(""), "");
    }
}
