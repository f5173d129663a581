//! CLI entrypoint for quizduel
//!
//! Wires the layers together with dependency injection and runs a
//! simulated duel: two configured players answer every round with random
//! picks, and both final views are printed as JSON.

use anyhow::{bail, Context, Result};
use clap::Parser;
use quizduel_application::{
    use_cases::create_duel::CreateDuelInput, use_cases::play_round::PlayRoundInput,
    CreateDuelUseCase, DuelStore, FetchDuelUseCase, PlayRoundUseCase,
};
use quizduel_domain::QuestionView;
use quizduel_infrastructure::{BankQuestionSource, ConfigLoader, MemoryDuelStore};
use rand::Rng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quizduel", about = "Turn-based quiz duel engine", version)]
struct Cli {
    /// Path to a configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ignore configuration files and use built-in defaults
    #[arg(long)]
    no_config: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// The two players of the simulated duel (defaults to the first two
    /// configured players)
    #[arg(long, num_args = 2)]
    players: Option<Vec<String>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    let [challenger, opponent] = match &cli.players {
        Some(players) => [players[0].clone(), players[1].clone()],
        None => match config.players.as_slice() {
            [first, second, ..] => [first.clone(), second.clone()],
            _ => bail!("Need at least two players (configure them or pass --players)"),
        },
    };

    // === Dependency Injection ===
    let source = Arc::new(
        BankQuestionSource::from_path(&config.bank.path)
            .with_context(|| format!("Can't load question bank {}", config.bank.path.display()))?,
    );
    let store = Arc::new(MemoryDuelStore::new());
    for player in config
        .players
        .iter()
        .map(String::as_str)
        .chain([challenger.as_str(), opponent.as_str()])
    {
        store.register_player(player).await;
    }

    let create = CreateDuelUseCase::new(source, store.clone()).with_rules(config.rules);
    let play = PlayRoundUseCase::new(store.clone());
    let fetch = FetchDuelUseCase::new(store.clone());

    info!(%challenger, %opponent, "Starting simulated duel");
    let duel_id = create
        .execute(CreateDuelInput::new(&challenger, &opponent))
        .await?;

    for round in 1..=config.rules.rounds_per_duel {
        for player in [&challenger, &opponent] {
            let view = fetch.get(duel_id, player).await?;
            let answers = random_answers(&view.rounds[round - 1]);
            play.execute(PlayRoundInput::new(duel_id, player, round, answers))
                .await?;
        }
    }

    for player in [&challenger, &opponent] {
        let view = fetch.get(duel_id, player).await?;
        let stats = store.player_stats(player).await?;
        println!("=== {player} (victories: {}, defeats: {})", stats.victories, stats.defeats);
        println!("{}", serde_json::to_string_pretty(&view)?);
    }

    Ok(())
}

/// Pick one random answer index per question of the round.
fn random_answers(round: &[QuestionView]) -> Vec<usize> {
    let mut rng = rand::thread_rng();
    round
        .iter()
        .map(|question| {
            let choices = question.answers.as_ref().map(Vec::len).unwrap_or(1);
            rng.gen_range(0..choices)
        })
        .collect()
}
