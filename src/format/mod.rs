//! Number formatting shared by search matching and rendering.
//!
//! The same formatter instance must be used for both, so a user typing a
//! number exactly as it is displayed (`2,381,741`) finds the record.

use std::sync::Arc;

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Formats numeric cell values for display.
///
/// Implementations must be deterministic: the pipeline formats values when
/// filtering and the view formats them again when rendering.
pub trait NumberFormat: Send + Sync {
    /// Render `value` as display text.
    fn format(&self, value: u64) -> String;
}

/// Shared handle to a formatter.
pub type SharedFormat = Arc<dyn NumberFormat>;

/// Groups integer digits in threes with a separator (`1234567` → `1,234,567`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalFormat {
    separator: String,
}

impl DecimalFormat {
    /// Create a formatter with a custom group separator.
    ///
    /// An empty separator disables grouping.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Wrap in a shared handle for the controller and the view.
    pub fn shared(self) -> SharedFormat {
        Arc::new(self)
    }
}

impl Default for DecimalFormat {
    fn default() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }
}

impl NumberFormat for DecimalFormat {
    fn format(&self, value: u64) -> String {
        let digits = value.to_string();
        if self.separator.is_empty() || digits.len() <= 3 {
            return digits;
        }

        let groups = (digits.len() - 1) / 3;
        let mut out = String::with_capacity(digits.len() + groups * self.separator.len());
        let lead = digits.len() - groups * 3;
        out.push_str(&digits[..lead]);
        for chunk in digits.as_bytes()[lead..].chunks(3) {
            out.push_str(&self.separator);
            // Digits are ASCII.
            out.extend(chunk.iter().map(|&b| b as char));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_are_not_grouped() {
        let fmt = DecimalFormat::default();
        assert_eq!(fmt.format(0), "0");
        assert_eq!(fmt.format(26), "26");
        assert_eq!(fmt.format(999), "999");
    }

    #[test]
    fn groups_thousands_with_commas() {
        let fmt = DecimalFormat::default();
        assert_eq!(fmt.format(1_000), "1,000");
        assert_eq!(fmt.format(357_022), "357,022");
        assert_eq!(fmt.format(2_381_741), "2,381,741");
        assert_eq!(fmt.format(1_409_517_397), "1,409,517,397");
    }

    #[test]
    fn formats_u64_max() {
        let fmt = DecimalFormat::default();
        assert_eq!(fmt.format(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn custom_separator_is_used() {
        let fmt = DecimalFormat::with_separator(".");
        assert_eq!(fmt.format(82_800_000), "82.800.000");

        let fmt = DecimalFormat::with_separator("\u{202f}");
        assert_eq!(fmt.format(12_345), "12\u{202f}345");
    }

    #[test]
    fn empty_separator_disables_grouping() {
        let fmt = DecimalFormat::with_separator("");
        assert_eq!(fmt.format(40_400_000), "40400000");
    }

    #[test]
    fn formatting_is_deterministic() {
        let fmt = DecimalFormat::default().shared();
        assert_eq!(fmt.format(146_989_754), fmt.format(146_989_754));
    }
}
