//! Formatted display values and their random replacements.

use rand::Rng;

/// A formatted value shown on screen, animated one character at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayValue(String);

impl DisplayValue {
    /// Wrap an already formatted string.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The formatted text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Characters in display order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    /// Number of characters (not bytes).
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether the value has no characters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Character index of the decimal point, if any.
    pub fn decimal_index(&self) -> Option<usize> {
        self.0.chars().position(|c| c == '.')
    }

    /// The numeric value with currency, grouping, and percent signs removed.
    pub fn numeric(&self) -> Option<f64> {
        let digits: String = self
            .0
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        digits.parse().ok()
    }
}

impl std::fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a display value represents, which decides how it is regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Account balance: `$` prefix, thousands separators, two decimals.
    Balance,
    /// Dollar change: `$` prefix, two decimals, within `[10, 510)`.
    Dollar,
    /// Percent change: one decimal and `%` suffix, within `[0.5, 15.5)`.
    Percent,
}

impl ValueKind {
    /// The value shown before the first reroll.
    pub fn initial(self) -> DisplayValue {
        match self {
            Self::Balance => DisplayValue::new("$176,325.57"),
            Self::Dollar => DisplayValue::new("$97.45"),
            Self::Percent => DisplayValue::new("2.3%"),
        }
    }

    /// Draw a fresh value of this kind.
    ///
    /// Draws happen in minor units (cents, tenths) so the printed value never
    /// rounds up past the end of its range.
    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R) -> DisplayValue {
        match self {
            Self::Balance => {
                let whole: u64 = rng.random_range(100_000..1_000_000);
                let cents: u64 = rng.random_range(0..100);
                DisplayValue(format!("${}.{cents:02}", group_thousands(whole)))
            }
            Self::Dollar => format_cents(rng.random_range(1_000..51_000)),
            Self::Percent => format_tenths_percent(rng.random_range(5..155)),
        }
    }
}

/// Insert `,` between groups of three digits.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format an amount of cents as `$D.CC`.
pub fn format_cents(cents: u64) -> DisplayValue {
    DisplayValue(format!("${}.{:02}", cents / 100, cents % 100))
}

/// Format tenths of a percent as `P.T%`.
pub fn format_tenths_percent(tenths: u32) -> DisplayValue {
    DisplayValue(format!("{}.{}%", tenths / 10, tenths % 10))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fraction_digits(value: &DisplayValue) -> usize {
        let text = value.as_str().trim_end_matches('%');
        text.split_once('.').map(|(_, f)| f.len()).unwrap_or(0)
    }

    #[test]
    fn grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(176_325), "176,325");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn initial_values() {
        assert_eq!(ValueKind::Balance.initial().as_str(), "$176,325.57");
        assert_eq!(ValueKind::Dollar.initial().as_str(), "$97.45");
        assert_eq!(ValueKind::Percent.initial().as_str(), "2.3%");
    }

    #[test]
    fn minor_unit_formatting() {
        assert_eq!(format_cents(1_000).as_str(), "$10.00");
        assert_eq!(format_cents(50_999).as_str(), "$509.99");
        assert_eq!(format_tenths_percent(5).as_str(), "0.5%");
        assert_eq!(format_tenths_percent(154).as_str(), "15.4%");
    }

    #[test]
    fn display_value_shape() {
        let value = DisplayValue::new("$176,325.57");
        assert_eq!(value.len(), 11);
        assert_eq!(value.decimal_index(), Some(8));
        assert_eq!(value.numeric(), Some(176_325.57));
        assert_eq!(value.to_string(), "$176,325.57");
        assert_eq!(DisplayValue::new("12%").decimal_index(), None);
    }

    proptest! {
        #[test]
        fn percent_in_range(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let value = ValueKind::Percent.generate(&mut rng);
            let n = value.numeric().unwrap();
            prop_assert!((0.5..15.5).contains(&n), "{value}");
            prop_assert!(value.as_str().ends_with('%'));
            prop_assert_eq!(fraction_digits(&value), 1);
        }

        #[test]
        fn dollar_in_range(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let value = ValueKind::Dollar.generate(&mut rng);
            let n = value.numeric().unwrap();
            prop_assert!((10.0..510.0).contains(&n), "{value}");
            prop_assert!(value.as_str().starts_with('$'));
            prop_assert_eq!(fraction_digits(&value), 2);
        }

        #[test]
        fn balance_non_negative_two_decimals(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let value = ValueKind::Balance.generate(&mut rng);
            let n = value.numeric().unwrap();
            prop_assert!(n >= 0.0);
            prop_assert!((100_000.0..1_000_000.0).contains(&n), "{value}");
            prop_assert_eq!(fraction_digits(&value), 2);
            prop_assert_eq!(value.as_str().matches(',').count(), 1);
        }
    }
}
