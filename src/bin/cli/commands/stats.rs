use anyhow::Result;

use fraza_lib::review::risk_score;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let mut phrases = app.list_phrases()?;
    phrases.sort_by(|a, b| {
        risk_score(b)
            .partial_cmp(&risk_score(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total_rounds: u32 = phrases.iter().map(|p| p.total_attempts()).sum();
    let total_failures: u32 = phrases.iter().map(|p| p.failure_count).sum();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = phrases
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "id": p.id.to_string(),
                        "text": p.text,
                        "riskScore": risk_score(p),
                        "successCount": p.success_count,
                        "failureCount": p.failure_count,
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "phrases": output,
                    "totalPhrases": phrases.len(),
                    "totalRounds": total_rounds,
                    "totalFailures": total_failures,
                }))?
            );
        }
        OutputFormat::Plain => {
            if phrases.is_empty() {
                println!("No phrases yet.");
                return Ok(());
            }

            println!("{:<8} {:>5}  {:>4} {:>4}  {}", "risk", "", "✓", "✗", "phrase");
            for phrase in &phrases {
                let score = risk_score(phrase);
                let risk = format!("{:.2}", score);
                let risk = if use_color && score >= 0.3 {
                    format!("\x1b[31m{}\x1b[0m", risk)
                } else {
                    risk
                };
                println!(
                    "{:<8} {:>5}  {:>4} {:>4}  {}",
                    risk,
                    if phrase.total_attempts() == 0 { "new" } else { "" },
                    phrase.success_count,
                    phrase.failure_count,
                    phrase.text,
                );
            }

            println!();
            println!(
                "{} phrases, {} rounds completed, {} failed",
                phrases.len(),
                total_rounds,
                total_failures
            );
        }
    }

    Ok(())
}
