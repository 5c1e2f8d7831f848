//! Debit/credit totals of a journal entry being typed.

/// Two amounts closer than this are considered equal.
pub const TOLERANCIA: f64 = 0.01;

/// Parse a user-typed amount. Empty or non-numeric input counts as zero.
///
/// A comma is accepted as decimal separator when the text has no dot.
/// Dots are never read as thousands grouping: `1.500.000` is not a number
/// and counts as zero. Negative values pass through unchanged.
pub fn parse_amount(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    let normalized = if s.contains(',') && !s.contains('.') {
        s.replace(',', ".")
    } else {
        s.replace(',', "")
    };
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Render an amount back into an input field: integers without decimals,
/// everything else rounded to cents.
pub fn format_amount(value: f64) -> String {
    let cents = (value * 100.0).round() / 100.0;
    if (cents - cents.trunc()).abs() < f64::EPSILON {
        format!("{}", cents as i64)
    } else {
        format!("{:.2}", cents)
    }
}

pub fn iguales(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCIA
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totales {
    pub debito: f64,
    pub credito: f64,
}

impl Totales {
    /// Debit minus credit.
    pub fn diferencia(&self) -> f64 {
        self.debito - self.credito
    }

    /// Balanced means equal sides and a non-zero credit total, so an empty
    /// entry never reports balanced.
    pub fn esta_balanceado(&self) -> bool {
        iguales(self.debito, self.credito) && self.credito != 0.0
    }
}

/// Sum typed `(debito, credito)` pairs.
pub fn calcular_totales<'a, I>(pares: I) -> Totales
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pares
        .into_iter()
        .fold(Totales::default(), |acc, (debito, credito)| Totales {
            debito: acc.debito + parse_amount(debito),
            credito: acc.credito + parse_amount(credito),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("100000"), 100000.0);
        assert_eq!(parse_amount(" 1500.50 "), 1500.5);
        assert_eq!(parse_amount("1500,50"), 1500.5);
        assert_eq!(parse_amount("1,500.50"), 1500.5);
        assert_eq!(parse_amount("-200"), -200.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
    }

    #[test]
    fn test_parse_amount_rejects_dot_grouping() {
        assert_eq!(parse_amount("1.500.000"), 0.0);
        assert_eq!(parse_amount("1.500.000,50"), 0.0);
        assert_eq!(parse_amount("1.500"), 1.5);
        assert_eq!(parse_amount("1500000"), 1_500_000.0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(100000.0), "100000");
        assert_eq!(format_amount(0.1 + 0.2), "0.30");
        assert_eq!(format_amount(1234.5), "1234.50");
    }

    #[test]
    fn test_balanced_requires_non_zero_credit() {
        let t = calcular_totales([("", ""), ("0", "abc")]);
        assert_eq!(t, Totales::default());
        assert!(!t.esta_balanceado());
    }

    #[test]
    fn test_balanced_within_tolerance() {
        let t = calcular_totales([("100.004", ""), ("", "100")]);
        assert!(t.esta_balanceado());

        let t = calcular_totales([("100.02", ""), ("", "100")]);
        assert!(!t.esta_balanceado());
        assert!((t.diferencia() - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_balanced_matches_predicate_for_many_rows() {
        let filas = [
            ("250000", ""),
            ("", "119000"),
            ("", "131000"),
            ("xx", ""),
        ];
        let t = calcular_totales(filas);
        assert_eq!(t.debito, 250000.0);
        assert_eq!(t.credito, 250000.0);
        assert_eq!(
            t.esta_balanceado(),
            (t.debito - t.credito).abs() < TOLERANCIA && t.credito != 0.0
        );
    }
}
