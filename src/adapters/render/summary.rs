//! Run summary output (text or JSON)

use std::io::Write;

use clap::ValueEnum;

use crate::ports::RenderError;
use crate::strategy::PathSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn write_summary<W: Write>(
    writer: &mut W,
    summary: &PathSummary,
    format: OutputFormat,
) -> Result<(), RenderError> {
    match format {
        OutputFormat::Json => {
            let content = serde_json::to_string_pretty(summary)?;
            writeln!(writer, "{}", content)?;
        }
        OutputFormat::Text => {
            writeln!(writer, "Steps:              {}", summary.steps)?;
            writeln!(writer, "Horizon:            {}", summary.horizon)?;
            writeln!(
                writer,
                "Adjustments:        {} down (upper barrier), {} up (lower barrier)",
                summary.down_adjustments, summary.up_adjustments
            )?;
            writeln!(writer, "Adjustment Cost:    {:.2}", summary.adjustment_cost)?;
            writeln!(writer, "Holding Cost:       {:.2}", summary.holding_cost)?;
            writeln!(writer, "Total Cost:         {:.2}", summary.total_cost)?;
            writeln!(writer, "Avg Cost / Time:    {:.4}", summary.average_cost_per_time)?;
            writeln!(
                writer,
                "Value Range:        [{:.4}, {:.4}]",
                summary.min_value, summary.max_value
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> PathSummary {
        PathSummary {
            steps: 1000,
            horizon: 1.0,
            down_adjustments: 3,
            up_adjustments: 2,
            adjustment_cost: 5.15,
            holding_cost: 41.7,
            total_cost: 46.85,
            average_cost_per_time: 46.85,
            min_value: -0.49,
            max_value: 0.48,
        }
    }

    #[test]
    fn test_text_summary() {
        let mut out = Vec::new();
        write_summary(&mut out, &summary(), OutputFormat::Text).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Steps:              1000"));
        assert!(text.contains("3 down (upper barrier), 2 up (lower barrier)"));
        assert!(text.contains("Adjustment Cost:    5.15"));
        assert!(text.contains("Holding Cost:       41.70"));
    }

    #[test]
    fn test_json_summary_round_trips() {
        let mut out = Vec::new();
        write_summary(&mut out, &summary(), OutputFormat::Json).unwrap();
        let parsed: PathSummary = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, summary());
    }
}
