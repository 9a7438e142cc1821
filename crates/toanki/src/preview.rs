use crate::config::Config;
use crate::prelude::{println, *};
use colored::Colorize;
use toanki_core::classify::{Card, DecksAndCards};

#[derive(Debug, clap::Args, Clone)]
pub struct PreviewOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Convert the plan to a JSON string
fn format_preview_json(plan: &DecksAndCards) -> Result<String> {
    serde_json::to_string_pretty(plan).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn image_count(card: &Card) -> String {
    match (card.front_images.len(), card.back_images.len()) {
        (0, 0) => String::new(),
        (front, back) => f!("{front}/{back}"),
    }
}

fn output_formatted(plan: &DecksAndCards) {
    println!("{}", f!("DECKS ({})", plan.decks.len()).bright_cyan().bold());
    if plan.decks.is_empty() {
        println!("{}", "No decks.".yellow());
    }
    for deck in &plan.decks {
        println!("  {deck}");
    }
    println!();

    println!("{}", f!("CARDS ({})", plan.cards.len()).bright_cyan().bold());
    if plan.cards.is_empty() {
        println!("{}", "No cards.".yellow());
        return;
    }

    let mut table = crate::prelude::new_table(&["Deck", "Front", "Back", "Images"]);
    for card in &plan.cards {
        table.add_row(prettytable::row![
            card.deck_path,
            card.front_text,
            card.back_text,
            image_count(card)
        ]);
    }
    table.printstd();
}

pub async fn run(options: PreviewOptions, global: crate::Global) -> Result<()> {
    let config = Config::load(&global)?;

    if global.verbose {
        println!("Input: {}", config.input_path.display());
        println!();
    }

    let plan = crate::import::plan_import(&config)?;

    if options.json {
        println!("{}", format_preview_json(&plan)?);
    } else {
        output_formatted(&plan);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(front: usize, back: usize) -> Card {
        Card {
            deck_path: "D".to_string(),
            front_text: "Q".to_string(),
            back_text: "A".to_string(),
            front_images: vec!["f".to_string(); front],
            back_images: vec!["b".to_string(); back],
        }
    }

    #[test]
    fn test_image_count() {
        assert_eq!(image_count(&card(0, 0)), "");
        assert_eq!(image_count(&card(2, 1)), "2/1");
        assert_eq!(image_count(&card(0, 3)), "0/3");
    }

    #[test]
    fn test_format_preview_json() {
        let plan = DecksAndCards {
            decks: vec!["D".to_string()],
            cards: vec![card(1, 0)],
        };
        let json: serde_json::Value =
            serde_json::from_str(&format_preview_json(&plan).unwrap()).unwrap();

        assert_eq!(json["decks"], serde_json::json!(["D"]));
        assert_eq!(json["cards"][0]["deck_path"], "D");
        assert_eq!(json["cards"][0]["front_images"], serde_json::json!(["f"]));
    }
}
