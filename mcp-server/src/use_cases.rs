use anyhow::Result;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use megasena::{
    DateValue, DisplayFormatter, DrawReport, HitCount, LocaleFormatter, TierStats, adapt,
    render_text, resolve_tier,
};

/// Reads the draw payload either from a `raw_json` string or an inline `payload` value.
fn payload_argument(arguments: &HashMap<String, Value>) -> Result<Value> {
    if let Some(raw_json) = arguments.get("raw_json").and_then(|v| v.as_str()) {
        return serde_json::from_str(raw_json)
            .map_err(|e| anyhow::anyhow!("Invalid raw_json: {}", e));
    }

    arguments
        .get("payload")
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Missing raw_json parameter"))
}

pub struct DrawUseCase {
    formatter: Arc<LocaleFormatter>,
}

impl DrawUseCase {
    pub fn new(formatter: Arc<LocaleFormatter>) -> Self {
        Self { formatter }
    }

    pub async fn adapt_draw_result(&self, arguments: &HashMap<String, Value>) -> Result<String> {
        let payload = payload_argument(arguments)?;
        let result = adapt(&payload);

        Ok(json!({
            "success": true,
            "found": result.is_some(),
            "result": result
        })
        .to_string())
    }

    pub async fn resolve_prize_tier(&self, arguments: &HashMap<String, Value>) -> Result<String> {
        let hit_count = arguments
            .get("hit_count")
            .and_then(|v| v.as_i64())
            .ok_or_else(|| anyhow::anyhow!("Missing hit_count parameter"))?;
        let hit_count = HitCount::try_from(hit_count)?;

        let payload = payload_argument(arguments)?;
        let result = adapt(&payload);
        let tier = result
            .as_ref()
            .and_then(|r| resolve_tier(&r.prize_tiers, hit_count));
        let stats = TierStats::from_tier(hit_count, tier);

        Ok(json!({
            "success": true,
            "found": result.is_some(),
            "tier": tier,
            "stats": stats,
            "prize": self.formatter.format_currency(Some(stats.prize_amount))
        })
        .to_string())
    }

    pub async fn summarize_draw_result(
        &self,
        arguments: &HashMap<String, Value>,
    ) -> Result<String> {
        let payload = payload_argument(arguments)?;

        let Some(result) = adapt(&payload) else {
            return Ok(json!({
                "success": true,
                "found": false,
                "message": "No draw result in payload"
            })
            .to_string());
        };

        let report = DrawReport::build(&result, self.formatter.as_ref());
        let text = render_text(&report);

        Ok(json!({
            "success": true,
            "found": true,
            "report": report,
            "text": text
        })
        .to_string())
    }
}

pub struct FormatUseCase {
    formatter: Arc<LocaleFormatter>,
}

impl FormatUseCase {
    pub fn new(formatter: Arc<LocaleFormatter>) -> Self {
        Self { formatter }
    }

    pub async fn format_currency(&self, arguments: &HashMap<String, Value>) -> Result<String> {
        let value = match arguments.get("value") {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                v.as_f64()
                    .ok_or_else(|| anyhow::anyhow!("value must be a number"))?,
            ),
        };

        Ok(json!({
            "success": true,
            "formatted": self.formatter.format_currency(value)
        })
        .to_string())
    }

    pub async fn format_date(&self, arguments: &HashMap<String, Value>) -> Result<String> {
        let value = match arguments.get("value") {
            None | Some(Value::Null) => None,
            Some(v) => Some(DateValue::from(
                v.as_str()
                    .ok_or_else(|| anyhow::anyhow!("value must be a string"))?,
            )),
        };

        Ok(json!({
            "success": true,
            "formatted": self.formatter.format_date(value.as_ref())
        })
        .to_string())
    }
}
