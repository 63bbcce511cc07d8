use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::QcFinanceError;
use crate::types::{Money, Rate};
use crate::QcFinanceResult;

/// A marginal-rate band. `max == None` marks the unbounded top bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min: Money,
    #[serde(default)]
    pub max: Option<Money>,
    pub rate: Rate,
}

impl TaxBracket {
    pub fn new(min: Money, max: Option<Money>, rate: Rate) -> Self {
        TaxBracket { min, max, rate }
    }

    /// Width of the band, `None` for the top bracket.
    pub fn width(&self) -> Option<Money> {
        self.max.map(|max| max - self.min)
    }
}

/// An ordered, validated bracket schedule.
///
/// Only obtainable through [`BracketTable::new`] (or deserialisation, which
/// routes through it), so every instance is contiguous, starts at zero and
/// ends with an unbounded bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBracketTable")]
pub struct BracketTable {
    name: String,
    brackets: Vec<TaxBracket>,
}

#[derive(Deserialize)]
struct RawBracketTable {
    name: String,
    brackets: Vec<TaxBracket>,
}

impl TryFrom<RawBracketTable> for BracketTable {
    type Error = QcFinanceError;

    fn try_from(raw: RawBracketTable) -> Result<Self, Self::Error> {
        BracketTable::new(raw.name, raw.brackets)
    }
}

impl BracketTable {
    pub fn new(name: impl Into<String>, brackets: Vec<TaxBracket>) -> QcFinanceResult<Self> {
        let name = name.into();
        validate_brackets(&name, &brackets)?;
        Ok(BracketTable { name, brackets })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Rate of the unbounded top bracket.
    pub fn top_rate(&self) -> Rate {
        self.brackets
            .last()
            .map(|b| b.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

fn validate_brackets(name: &str, brackets: &[TaxBracket]) -> QcFinanceResult<()> {
    let first = brackets
        .first()
        .ok_or_else(|| QcFinanceError::malformed(name, "bracket table is empty"))?;
    if !first.min.is_zero() {
        return Err(QcFinanceError::malformed(
            name,
            format!("first bracket must start at 0, found {}", first.min),
        ));
    }

    let last_idx = brackets.len() - 1;
    for (i, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(QcFinanceError::malformed(
                name,
                format!("bracket {i} rate {} outside [0, 1]", bracket.rate),
            ));
        }

        match bracket.max {
            None if i != last_idx => {
                return Err(QcFinanceError::malformed(
                    name,
                    format!("bracket {i} is unbounded but is not the last bracket"),
                ));
            }
            None => {}
            Some(_) if i == last_idx => {
                return Err(QcFinanceError::malformed(
                    name,
                    "top bracket must be unbounded",
                ));
            }
            Some(max) => {
                if max <= bracket.min {
                    return Err(QcFinanceError::malformed(
                        name,
                        format!("bracket {i} max {max} not above min {}", bracket.min),
                    ));
                }
                let next = &brackets[i + 1];
                if next.min != max {
                    return Err(QcFinanceError::malformed(
                        name,
                        format!(
                            "gap or overlap between bracket {i} (max {max}) and bracket {} (min {})",
                            i + 1,
                            next.min
                        ),
                    ));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn two_band() -> Vec<TaxBracket> {
        vec![
            TaxBracket::new(dec!(0), Some(dec!(10_000)), dec!(0.10)),
            TaxBracket::new(dec!(10_000), None, dec!(0.20)),
        ]
    }

    #[test]
    fn test_valid_table() {
        let table = BracketTable::new("test", two_band()).unwrap();
        assert_eq!(table.brackets().len(), 2);
        assert_eq!(table.top_rate(), dec!(0.20));
        assert_eq!(table.brackets()[0].width(), Some(dec!(10_000)));
        assert_eq!(table.brackets()[1].width(), None);
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = BracketTable::new("empty", vec![]).unwrap_err();
        assert!(matches!(err, QcFinanceError::MalformedTable { .. }));
    }

    #[test]
    fn test_gap_rejected() {
        let mut brackets = two_band();
        brackets[1].min = dec!(10_001);
        assert!(BracketTable::new("gap", brackets).is_err());
    }

    #[test]
    fn test_overlap_rejected() {
        let mut brackets = two_band();
        brackets[1].min = dec!(9_000);
        assert!(BracketTable::new("overlap", brackets).is_err());
    }

    #[test]
    fn test_bounded_top_rejected() {
        let mut brackets = two_band();
        brackets[1].max = Some(dec!(50_000));
        assert!(BracketTable::new("bounded", brackets).is_err());
    }

    #[test]
    fn test_unbounded_middle_rejected() {
        let mut brackets = two_band();
        brackets[0].max = None;
        assert!(BracketTable::new("middle", brackets).is_err());
    }

    #[test]
    fn test_nonzero_start_rejected() {
        let brackets = vec![TaxBracket::new(dec!(100), None, dec!(0.1))];
        assert!(BracketTable::new("start", brackets).is_err());
    }

    #[test]
    fn test_percent_rate_rejected() {
        let brackets = vec![TaxBracket::new(dec!(0), None, dec!(15))];
        assert!(BracketTable::new("percent", brackets).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let bad = r#"{"name":"bad","brackets":[{"min":"0","max":"100","rate":"0.1"},{"min":"200","rate":"0.2"}]}"#;
        assert!(serde_json::from_str::<BracketTable>(bad).is_err());

        let good = r#"{"name":"good","brackets":[{"min":"0","max":"100","rate":"0.1"},{"min":"100","rate":"0.2"}]}"#;
        let table: BracketTable = serde_json::from_str(good).unwrap();
        assert_eq!(table.name(), "good");
    }
}
