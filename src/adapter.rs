//! Turns a raw draw payload into the canonical [`DrawResult`].
//!
//! Providers disagree on field names, so every canonical field is read from
//! an ordered list of synonym keys. The first key holding a non-null value
//! wins; later keys are only fallbacks and values are never merged.

use crate::resolver::resolve_tier;
use crate::types::{DateValue, DrawResult, HitCount, PrizeTier};
use serde_json::{Map, Value};
use std::fmt::Debug;
use tracing::{debug, warn};

/// A canonical field together with the payload keys it may be published under.
pub trait Synonyms: Debug + Copy {
    fn keys(self) -> &'static [&'static str];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawField {
    ContestNumber,
    DrawDate,
    WinningNumbers,
    RolledOver,
    LocationName,
    LocationRegion,
    NextEstimatedPrize,
    NextAccumulatedPrize,
    SpecialAccumulatedPrize,
    ZeroFiveAccumulatedPrize,
    TotalCollected,
    ZeroFiveContestNumber,
    NextContestDate,
    PrizeTiers,
}

impl Synonyms for DrawField {
    fn keys(self) -> &'static [&'static str] {
        match self {
            DrawField::ContestNumber => &["numero", "concurso"],
            DrawField::DrawDate => &["dataApuracao", "data"],
            DrawField::WinningNumbers => &["listaDezenas", "dezenas"],
            DrawField::RolledOver => &["acumulado", "acumulou"],
            DrawField::LocationName => &["localSorteio", "local"],
            DrawField::LocationRegion => &["nomeMunicipioUFSorteio", "municipioUFSorteio"],
            DrawField::NextEstimatedPrize => &["valorEstimadoProximoConcurso"],
            DrawField::NextAccumulatedPrize => &["valorAcumuladoProximoConcurso"],
            DrawField::SpecialAccumulatedPrize => &["valorAcumuladoConcursoEspecial"],
            DrawField::ZeroFiveAccumulatedPrize => &["valorAcumuladoConcurso_0_5"],
            DrawField::TotalCollected => &["valorArrecadado"],
            DrawField::ZeroFiveContestNumber => &["numeroConcursoFinal_0_5"],
            DrawField::NextContestDate => &["dataProximoConcurso"],
            DrawField::PrizeTiers => &["listaRateioPremio", "premiacao"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierField {
    Description,
    RangeCode,
    WinnerCount,
    PrizeAmount,
}

impl Synonyms for TierField {
    fn keys(self) -> &'static [&'static str] {
        match self {
            TierField::Description => &["descricaoFaixa", "descricao"],
            TierField::RangeCode => &["faixa"],
            TierField::WinnerCount => &["numeroDeGanhadores", "ganhadores"],
            TierField::PrizeAmount => &["valorPremio", "premio"],
        }
    }
}

/// First non-null value among the field's synonym keys.
pub fn first_present<F: Synonyms>(obj: &Map<String, Value>, field: F) -> Option<&Value> {
    field.keys().iter().enumerate().find_map(|(position, key)| {
        let value = obj.get(*key).filter(|v| !v.is_null())?;
        if position > 0 {
            debug!(?field, key, "read from fallback synonym");
        }
        Some(value)
    })
}

fn read<'a, F, T>(
    obj: &'a Map<String, Value>,
    field: F,
    convert: impl Fn(&'a Value) -> Option<T>,
) -> Option<T>
where
    F: Synonyms,
{
    let value = first_present(obj, field)?;
    let converted = convert(value);
    if converted.is_none() {
        warn!(?field, %value, "ignoring value of unexpected type");
    }
    converted
}

fn integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

fn count(value: &Value) -> Option<u64> {
    integer(value).and_then(|n| u64::try_from(n).ok())
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn date(value: &Value) -> Option<DateValue> {
    value.as_str().map(DateValue::from)
}

fn amount(value: &Value) -> Option<f64> {
    value.as_f64()
}

/// Some providers publish the drawn numbers as zero-padded strings ("04").
fn drawn_number(value: &Value) -> Option<u32> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        other => integer(other).and_then(|n| u32::try_from(n).ok()),
    }
}

fn winning_numbers(values: &[Value]) -> Vec<u32> {
    values
        .iter()
        .filter_map(|v| {
            let number = drawn_number(v);
            if number.is_none() {
                warn!(%v, "skipping winning number that is not an integer");
            }
            number
        })
        .collect()
}

fn adapt_tier(value: &Value) -> Option<PrizeTier> {
    let Some(obj) = value.as_object() else {
        warn!(%value, "skipping prize tier that is not an object");
        return None;
    };

    Some(PrizeTier {
        description: read(obj, TierField::Description, text),
        range_code: read(obj, TierField::RangeCode, integer),
        winner_count: read(obj, TierField::WinnerCount, count),
        prize_amount: read(obj, TierField::PrizeAmount, amount),
    })
}

/// Extracts the canonical record from `raw`.
///
/// Returns `None` when there is no usable result: `null`, an empty array, or
/// something that is not an object. Individual fields never fail; they are
/// simply absent.
pub fn adapt(raw: &Value) -> Option<DrawResult> {
    let source = match raw {
        Value::Array(items) => items.first()?,
        other => other,
    };

    let Some(obj) = source.as_object() else {
        if !source.is_null() {
            warn!("draw payload is not an object, nothing to adapt");
        }
        return None;
    };

    let prize_tiers: Vec<PrizeTier> = read(obj, DrawField::PrizeTiers, Value::as_array)
        .map(|tiers| tiers.iter().filter_map(adapt_tier).collect())
        .unwrap_or_default();

    // Without an explicit flag, an empty top tier means the jackpot rolled over.
    let is_rolled_over = read(obj, DrawField::RolledOver, Value::as_bool).unwrap_or_else(|| {
        resolve_tier(&prize_tiers, HitCount::Six)
            .is_some_and(|tier| tier.winner_count.unwrap_or(0) == 0)
    });

    Some(DrawResult {
        contest_number: read(obj, DrawField::ContestNumber, integer),
        draw_date: read(obj, DrawField::DrawDate, date),
        winning_numbers: read(obj, DrawField::WinningNumbers, Value::as_array)
            .map(|values| winning_numbers(values))
            .unwrap_or_default(),
        is_rolled_over,
        draw_location_name: read(obj, DrawField::LocationName, text),
        draw_location_region: read(obj, DrawField::LocationRegion, text),
        next_contest_estimated_prize: read(obj, DrawField::NextEstimatedPrize, amount),
        next_contest_accumulated_prize: read(obj, DrawField::NextAccumulatedPrize, amount),
        special_accumulated_prize: read(obj, DrawField::SpecialAccumulatedPrize, amount),
        zero_five_accumulated_prize: read(obj, DrawField::ZeroFiveAccumulatedPrize, amount),
        total_collected: read(obj, DrawField::TotalCollected, amount),
        zero_five_contest_number: read(obj, DrawField::ZeroFiveContestNumber, integer),
        next_contest_date: read(obj, DrawField::NextContestDate, date),
        prize_tiers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn caixa_payload() -> Value {
        json!({
            "numero": 2750,
            "dataApuracao": "27/07/2024",
            "listaDezenas": ["04", "13", "22", "35", "41", "60"],
            "acumulado": false,
            "localSorteio": "ESPAÇO DA SORTE",
            "nomeMunicipioUFSorteio": "SÃO PAULO, SP",
            "valorEstimadoProximoConcurso": 3500000.0,
            "valorAcumuladoProximoConcurso": 0.0,
            "valorAcumuladoConcursoEspecial": 91234567.89,
            "valorAcumuladoConcurso_0_5": 12345678.9,
            "numeroConcursoFinal_0_5": 2755,
            "valorArrecadado": 65432109.12,
            "dataProximoConcurso": "30/07/2024",
            "listaRateioPremio": [
                {"descricaoFaixa": "6 acertos", "faixa": 1, "numeroDeGanhadores": 1, "valorPremio": 45000000.0},
                {"descricaoFaixa": "5 acertos", "faixa": 2, "numeroDeGanhadores": 87, "valorPremio": 52000.5},
                {"descricaoFaixa": "4 acertos", "faixa": 3, "numeroDeGanhadores": 6000, "valorPremio": 1100.25}
            ]
        })
    }

    #[test]
    fn test_adapt_caixa_shape() {
        let result = adapt(&caixa_payload()).unwrap();

        assert_eq!(result.contest_number, Some(2750));
        assert_eq!(result.draw_date, Some(DateValue::from("27/07/2024")));
        assert_eq!(result.winning_numbers, vec![4, 13, 22, 35, 41, 60]);
        assert!(!result.is_rolled_over);
        assert_eq!(result.draw_location_name.as_deref(), Some("ESPAÇO DA SORTE"));
        assert_eq!(result.draw_location_region.as_deref(), Some("SÃO PAULO, SP"));
        assert_eq!(result.special_accumulated_prize, Some(91234567.89));
        assert_eq!(result.zero_five_contest_number, Some(2755));
        assert_eq!(result.prize_tiers.len(), 3);
        assert_eq!(result.prize_tiers[1].winner_count, Some(87));
        assert_eq!(result.prize_tiers[1].range_code, Some(2));
    }

    #[test]
    fn test_single_object_and_one_element_array_match() {
        let payload = caixa_payload();
        let wrapped = json!([payload.clone()]);

        assert_eq!(adapt(&payload), adapt(&wrapped));
    }

    #[test]
    fn test_empty_array_and_null_have_no_result() {
        assert_eq!(adapt(&json!([])), None);
        assert_eq!(adapt(&Value::Null), None);
        assert_eq!(adapt(&json!("not a draw")), None);
        assert_eq!(adapt(&json!([42])), None);
    }

    #[test]
    fn test_only_first_array_element_is_used() {
        let payload = json!([{"numero": 1}, {"numero": 2}]);
        assert_eq!(adapt(&payload).unwrap().contest_number, Some(1));
    }

    #[test]
    fn test_first_listed_synonym_wins_regardless_of_key_order() {
        let a = json!({"numero": 10, "concurso": 20, "data": "2024-01-02", "dataApuracao": "2024-01-01"});
        let b = json!({"dataApuracao": "2024-01-01", "concurso": 20, "data": "2024-01-02", "numero": 10});

        for payload in [a, b] {
            let result = adapt(&payload).unwrap();
            assert_eq!(result.contest_number, Some(10));
            assert_eq!(result.draw_date, Some(DateValue::from("2024-01-01")));
        }
    }

    #[test]
    fn test_fallback_synonym_used_when_first_is_null_or_missing() {
        let payload = json!({
            "numero": null,
            "concurso": 2699,
            "data": "08/06/2024",
            "dezenas": [1, 2, 3, 4, 5, 6],
            "premiacao": [{"descricao": "Sena", "faixa": 1, "ganhadores": 2, "premio": 100.0}]
        });
        let result = adapt(&payload).unwrap();

        assert_eq!(result.contest_number, Some(2699));
        assert_eq!(result.draw_date, Some(DateValue::from("08/06/2024")));
        assert_eq!(result.winning_numbers, vec![1, 2, 3, 4, 5, 6]);
        let tier = &result.prize_tiers[0];
        assert_eq!(tier.description.as_deref(), Some("Sena"));
        assert_eq!(tier.winner_count, Some(2));
        assert_eq!(tier.prize_amount, Some(100.0));
    }

    #[test]
    fn test_localized_tier_key_preferred_over_generic() {
        let payload = json!({
            "listaRateioPremio": [{"faixa": 1}],
            "premiacao": [{"faixa": 2}, {"faixa": 3}]
        });
        let result = adapt(&payload).unwrap();

        assert_eq!(result.prize_tiers.len(), 1);
        assert_eq!(result.prize_tiers[0].range_code, Some(1));
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let result = adapt(&json!({})).unwrap();

        assert_eq!(result, DrawResult::default());
        assert!(result.prize_tiers.is_empty());
        assert!(result.winning_numbers.is_empty());
    }

    #[test]
    fn test_zero_is_kept_distinct_from_absent() {
        let payload = json!({"premiacao": [{"faixa": 2, "valorPremio": 0, "numeroDeGanhadores": 0}, {"faixa": 3}]});
        let result = adapt(&payload).unwrap();

        assert_eq!(result.prize_tiers[0].prize_amount, Some(0.0));
        assert_eq!(result.prize_tiers[0].winner_count, Some(0));
        assert_eq!(result.prize_tiers[1].prize_amount, None);
        assert_eq!(result.prize_tiers[1].winner_count, None);
    }

    #[test]
    fn test_mistyped_values_become_absent() {
        let payload = json!({
            "numero": "abc",
            "concurso": 5,
            "valorArrecadado": "muito",
            "listaDezenas": ["07", "x", 12, -3],
            "premiacao": [{"numeroDeGanhadores": -1}, "garbage"]
        });
        let result = adapt(&payload).unwrap();

        assert_eq!(result.contest_number, None);
        assert_eq!(result.total_collected, None);
        assert_eq!(result.winning_numbers, vec![7, 12]);
        assert_eq!(result.prize_tiers.len(), 1);
        assert_eq!(result.prize_tiers[0].winner_count, None);
    }

    #[test]
    fn test_roll_over_derived_from_top_tier_when_flag_missing() {
        let rolled = json!({"premiacao": [{"descricao": "6 acertos", "ganhadores": 0}]});
        let won = json!({"premiacao": [{"faixa": 1, "ganhadores": 3}]});
        let unknown = json!({"premiacao": [{"faixa": 2, "ganhadores": 3}]});
        let explicit = json!({"acumulado": false, "premiacao": [{"faixa": 1, "ganhadores": 0}]});

        assert!(adapt(&rolled).unwrap().is_rolled_over);
        assert!(!adapt(&won).unwrap().is_rolled_over);
        assert!(!adapt(&unknown).unwrap().is_rolled_over);
        assert!(!adapt(&explicit).unwrap().is_rolled_over);
    }

    #[test]
    fn test_first_present_reports_fallback_value() {
        let obj = json!({"ganhadores": 4});
        let obj = obj.as_object().unwrap();

        assert_eq!(first_present(obj, TierField::WinnerCount), Some(&json!(4)));
        assert_eq!(first_present(obj, TierField::PrizeAmount), None);
    }
}
