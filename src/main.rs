use clap::Parser;
use pokememe_battle::persistence::{create_guest_profile, heal_party};
use pokememe_battle::{
    encounter_pool, pick_encounter, ActionError, BattleEngineError, BattleEvent, BattleKind,
    BattleRng, BattleRunner, GameConfig, GameStore, LocalStore, OpponentSpec, PlayerAction,
    SessionContext,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Text-mode wild battle against a local save file.
#[derive(Parser, Debug)]
#[command(name = "pokememe-battle", version)]
struct Arguments {
    /// RON game configuration; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Save file; overrides the configured path
    #[arg(long)]
    save: Option<PathBuf>,
    /// Encounter area; overrides the configured default
    #[arg(long)]
    area: Option<String>,
    /// Seed for a reproducible battle
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = "guest")]
    username: String,
    /// Starter species for a new profile
    #[arg(long, default_value_t = 4)]
    starter: u16,
}

enum Command {
    Act(PlayerAction),
    Acknowledge,
    Help,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let command = match (words.next()?, words.next()) {
        ("fight", Some(slot)) => {
            let slot: usize = slot.parse().ok()?;
            Command::Act(PlayerAction::UseMove {
                index: slot.checked_sub(1)?,
            })
        }
        ("item", Some(slug)) => Command::Act(PlayerAction::UseItem {
            item: slug.to_string(),
        }),
        ("run", None) => Command::Act(PlayerAction::Flee),
        ("ok", None) => Command::Acknowledge,
        _ => Command::Help,
    };
    Some(command)
}

fn print_events(events: &[BattleEvent]) {
    for message in events.iter().filter_map(BattleEvent::format) {
        println!("  {}", message);
    }
}

fn print_status(runner: &BattleRunner) {
    let state = runner.state();
    println!(
        "\n{} Lv{} HP {}/{}  |  {} Lv{} HP {}/{}  |  Pump {}",
        state.player.name,
        state.player.level,
        state.player.current_hp(),
        state.player.max_hp(),
        state.enemy.name,
        state.enemy.level,
        state.enemy.current_hp(),
        state.enemy.max_hp(),
        runner.pump_meter()
    );
    for (slot, move_data) in state.player.moves.iter().enumerate() {
        println!("  fight {}: {} ({:?})", slot + 1, move_data.name, move_data.move_type);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let arguments = Arguments::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let config = match &arguments.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let save_path = arguments.save.clone().unwrap_or_else(|| config.save_path.clone());
    let area = arguments
        .area
        .clone()
        .unwrap_or_else(|| config.default_area.clone());

    let mut store = LocalStore::open(save_path)?;
    let party = store.read_party(&arguments.username)?;
    if party.is_empty() {
        let starter =
            create_guest_profile(&mut store, &arguments.username, arguments.starter, &config)?;
        println!(
            "Welcome, {}! Your starter is species #{:03}.",
            arguments.username, starter.species_id
        );
    } else if party[0].current_hp == 0 {
        let healed = heal_party(&mut store, &arguments.username)?;
        println!("Your party of {} was healed.", healed);
    }

    let mut rng = match arguments.seed {
        Some(seed) => BattleRng::seeded(seed),
        None => BattleRng::new_random(),
    };

    let pool = encounter_pool(&area)?;
    let Some(encounter) = pick_encounter(&pool.entries, &mut rng) else {
        println!("Nothing lives in {}.", area);
        return Ok(());
    };

    let mut ctx = SessionContext::new(arguments.username.clone(), config, Box::new(store));
    let mut runner = BattleRunner::start(
        &mut ctx,
        OpponentSpec::from(encounter),
        BattleKind::Wild,
        rng,
    )?;
    print_events(&runner.advance_intro()?);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !runner.is_closed() {
        print_status(&runner);
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!("\nYou left the battle unfinished.");
            return Ok(());
        };

        let result = match parse_command(&line?) {
            Some(Command::Act(action)) => runner.submit_action(&mut ctx, action),
            Some(Command::Acknowledge) => runner.acknowledge_level_up(&mut ctx),
            Some(Command::Help) | None => {
                println!("Commands: fight N, item SLUG, run, ok");
                continue;
            }
        };

        match result {
            Ok(events) => print_events(&events),
            Err(BattleEngineError::Action(ActionError::NotAcceptingActions(_))) => {
                println!("  Type 'ok' to continue.")
            }
            Err(BattleEngineError::Action(err)) => println!("  {}", err),
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(outcome) = runner.outcome() {
        println!(
            "\nBattle over: {:?}{}",
            outcome.phase,
            if outcome.won { " (won)" } else { "" }
        );
    }
    for err in runner.persistence_errors() {
        eprintln!("Warning: progress may not have been saved: {}", err);
    }

    Ok(())
}
