use crate::fetch::OFFICIAL_RESULTS_URL;
use crate::formatter::DisplayFormatter;
use crate::resolver::{TierStats, tier_stats};
use crate::types::{DrawResult, HitCount};
use serde::Serialize;

pub fn get_tier_display_name(hit_count: HitCount) -> &'static str {
    match hit_count {
        HitCount::Six => "Sena",
        HitCount::Five => "Quina",
        HitCount::Four => "Quadra",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierLine {
    pub hit_count: i64,
    pub label: String,
    pub winner_count: u64,
    pub prize: String,
    pub has_winners: bool,
}

impl TierLine {
    fn from_stats(stats: &TierStats, formatter: &impl DisplayFormatter) -> Self {
        Self {
            hit_count: stats.hit_count.value(),
            label: format!(
                "{} ({})",
                get_tier_display_name(stats.hit_count),
                stats.hit_count
            ),
            winner_count: stats.winner_count,
            prize: formatter.format_currency(Some(stats.prize_amount)),
            has_winners: stats.has_winners(),
        }
    }
}

/// Display-ready view of one draw: every value already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawReport {
    pub headline: String,
    pub contest_number: String,
    pub draw_date: String,
    pub location: Option<String>,
    pub winning_numbers: Vec<String>,
    pub next_contest_date: String,
    pub next_contest_estimated_prize: String,
    pub next_contest_accumulated_prize: String,
    pub zero_five_contest_number: String,
    pub zero_five_accumulated_prize: String,
    pub special_accumulated_prize: String,
    pub total_collected: String,
    pub tiers: Vec<TierLine>,
    pub results_url: String,
}

impl DrawReport {
    pub fn build(result: &DrawResult, formatter: &impl DisplayFormatter) -> Self {
        let headline = if result.is_rolled_over {
            "Acumulou!"
        } else {
            "Saiu!"
        };

        let location = match (&result.draw_location_name, &result.draw_location_region) {
            (Some(name), Some(region)) => Some(format!("Sorteio realizado no {} em {}", name, region)),
            (Some(name), None) => Some(format!("Sorteio realizado no {}", name)),
            (None, Some(region)) => Some(format!("Sorteio realizado em {}", region)),
            (None, None) => None,
        };

        Self {
            headline: headline.to_string(),
            contest_number: optional_number(result.contest_number),
            draw_date: formatter.format_date(result.draw_date.as_ref()),
            location,
            winning_numbers: result
                .winning_numbers
                .iter()
                .map(|n| format!("{:02}", n))
                .collect(),
            next_contest_date: formatter.format_date(result.next_contest_date.as_ref()),
            next_contest_estimated_prize: formatter
                .format_currency(result.next_contest_estimated_prize),
            next_contest_accumulated_prize: formatter
                .format_currency(result.next_contest_accumulated_prize),
            zero_five_contest_number: optional_number(result.zero_five_contest_number),
            zero_five_accumulated_prize: formatter
                .format_currency(result.zero_five_accumulated_prize),
            special_accumulated_prize: formatter.format_currency(result.special_accumulated_prize),
            total_collected: formatter.format_currency(result.total_collected),
            tiers: tier_stats(result)
                .iter()
                .map(|stats| TierLine::from_stats(stats, formatter))
                .collect(),
            results_url: OFFICIAL_RESULTS_URL.to_string(),
        }
    }
}

fn optional_number(value: Option<i64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

/// Plain-text rendering of a report, one section per block of the results page.
pub fn render_text(report: &DrawReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "🍀 Resultado • Concurso {} • {}\n",
        report.contest_number, report.draw_date
    ));
    out.push_str(&format!("{}\n", report.headline));
    if let Some(location) = &report.location {
        out.push_str(&format!("{}\n", location));
    }
    out.push_str(&format!("Dezenas: {}\n\n", report.winning_numbers.join(" ")));

    out.push_str(&format!(
        "Estimativa de prêmio do próximo concurso {}: {}\n",
        report.next_contest_date, report.next_contest_estimated_prize
    ));
    out.push_str(&format!(
        "Acumulado próximo concurso: {}\n",
        report.next_contest_accumulated_prize
    ));
    out.push_str(&format!(
        "Acumulado próximo concurso final zero/cinco (Concurso {}): {}\n",
        report.zero_five_contest_number, report.zero_five_accumulated_prize
    ));
    out.push_str(&format!(
        "Acumulado para Mega da Virada: {}\n\n",
        report.special_accumulated_prize
    ));

    out.push_str("🏆 Premiação\n");
    for tier in &report.tiers {
        if tier.has_winners {
            out.push_str(&format!(
                "  {}: {} apostas ganhadoras, {}\n",
                tier.label, tier.winner_count, tier.prize
            ));
        } else {
            out.push_str(&format!("  {}: Não houve ganhadores\n", tier.label));
        }
    }

    out.push_str(&format!("\nArrecadação total: {}\n", report.total_collected));
    out.push_str(&format!("🔗 {}\n", report.results_url));

    out
}
