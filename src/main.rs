//! Playroom terminal front-end
//!
//! Renders each round as text, reads commands from stdin and speaks through
//! stdout. After a win the next round starts on its own once the configured
//! pause has passed.

use clap::{Parser, Subcommand};
use playroom::{
    config::PlayroomConfig,
    games::{EntryDetail, GameType, Round},
    ledger::ScoreLedger,
    speech::{ConsoleSpeaker, NullSpeaker, Speaker},
    storage::{open_store, ScoreStore},
    AnswerReport, Playroom, PlayroomResult,
};
use std::path::PathBuf;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep_until, Instant};

type TerminalPlayroom = Playroom<Box<dyn ScoreStore>, Box<dyn Speaker>>;

#[derive(Parser, Debug)]
#[command(name = "playroom")]
#[command(about = "Phonics, counting, shapes, colors and tracing games", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of the score database
    #[arg(long)]
    data_dir: Option<String>,

    /// Keep the score in memory only
    #[arg(long)]
    in_memory: bool,

    /// Start with audio off
    #[arg(long)]
    mute: bool,

    /// Never print spoken lines, even with audio on
    #[arg(long)]
    no_speech: bool,

    /// Seed for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively (default)
    Play,
    /// Print the saved score and coins
    Score,
    /// Print the effective configuration as TOML
    ShowConfig,
}

/// One line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Tab(GameType),
    New,
    Listen,
    Audio,
    Score,
    Show,
    Json,
    PenDown,
    PenMove,
    PenUp,
    Trace,
    Clear,
    Help,
    Quit,
    Pick(String),
}

impl FromStr for Input {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        if line.is_empty() {
            return Err("empty input".to_string());
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let input = match head.to_ascii_lowercase().as_str() {
            "tab" | "play" => Input::Tab(rest.parse()?),
            "new" => Input::New,
            "listen" => Input::Listen,
            "audio" => Input::Audio,
            "score" => Input::Score,
            "show" => Input::Show,
            "json" => Input::Json,
            "down" => Input::PenDown,
            "move" => Input::PenMove,
            "up" => Input::PenUp,
            "trace" => Input::Trace,
            "clear" => Input::Clear,
            "help" | "?" => Input::Help,
            "quit" | "exit" => Input::Quit,
            _ => match line.parse::<GameType>() {
                Ok(game) => Input::Tab(game),
                Err(_) => Input::Pick(line.to_string()),
            },
        };
        Ok(input)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = PlayroomConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_directory = dir;
    }
    if cli.in_memory {
        config.storage.in_memory = true;
    }
    if cli.mute {
        config.audio.enabled = false;
    }
    if cli.verbose {
        config.monitoring.log_level = playroom::config::LogLevel::Debug;
    }
    config.validate()?;

    init_tracing(&config);

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => run_interactive(config, cli.seed, speaker(cli.no_speech)).await,
        Commands::Score => {
            let ledger = ScoreLedger::open(
                open_store(&config.storage),
                config.storage.score_key.clone(),
                config.scoring.coin_value,
            );
            let coins = ledger.coins();
            println!(
                "⭐ {} points · 🪙 {} coins ({} to the next coin)",
                ledger.total(),
                coins.coins,
                coins.points_to_next_coin
            );
            Ok(())
        }
        Commands::ShowConfig => {
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn init_tracing(config: &PlayroomConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("playroom={}", config.monitoring.log_level.as_filter()).into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn speaker(no_speech: bool) -> Box<dyn Speaker> {
    if no_speech {
        Box::new(NullSpeaker)
    } else {
        Box::new(ConsoleSpeaker)
    }
}

/// Won rounds waiting for their pause to pass. Switching tabs never cancels
/// an entry.
#[derive(Debug, Default)]
struct PendingAdvances {
    queue: Vec<(Instant, GameType)>,
}

impl PendingAdvances {
    fn schedule(&mut self, report: &AnswerReport, now: Instant) {
        if let Some(delay) = report.advance_after {
            self.queue.push((now + delay, report.game));
        }
    }

    fn next_due(&self) -> Option<Instant> {
        self.queue.iter().map(|(at, _)| *at).min()
    }

    /// Remove every entry due by `now`, earliest first
    fn take_due(&mut self, now: Instant) -> Vec<GameType> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = self.queue.drain(..).partition(|(at, _)| *at <= now);
        self.queue = waiting;
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, game)| game).collect()
    }
}

/// Start a fresh round for every game whose pause has passed
fn advance_due(
    room: &mut TerminalPlayroom,
    pending: &mut PendingAdvances,
    now: Instant,
) -> PlayroomResult<Vec<GameType>> {
    let due = pending.take_due(now);
    for &game in &due {
        room.new_round(game)?;
    }
    Ok(due)
}

async fn run_interactive(
    config: PlayroomConfig,
    seed: Option<u64>,
    speaker: Box<dyn Speaker>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(&config.storage);
    let mut room: TerminalPlayroom = match seed {
        Some(seed) => Playroom::with_seed(config, store, speaker, seed)?,
        None => Playroom::new(config, store, speaker)?,
    };

    println!("🎈 Welcome to the Playroom! Type 'help' for commands.");
    render(&room);
    room.listen(room.active_game());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending = PendingAdvances::default();

    loop {
        let next_due = pending.next_due();

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = match line.parse::<Input>() {
                    Ok(input) => input,
                    Err(_) => continue,
                };
                if input == Input::Quit {
                    break;
                }
                if let Some(report) = handle_input(&mut room, input)? {
                    pending.schedule(&report, Instant::now());
                }
            }
            _ = sleep_until(next_due.unwrap_or_else(Instant::now)), if next_due.is_some() => {
                let started = advance_due(&mut room, &mut pending, Instant::now())?;
                if started.contains(&room.active_game()) {
                    render(&room);
                }
            }
        }
    }

    println!("👋 Bye! You have {} points.", room.total_points());
    Ok(())
}

fn handle_input(
    room: &mut TerminalPlayroom,
    input: Input,
) -> Result<Option<AnswerReport>, Box<dyn std::error::Error>> {
    let game = room.active_game();
    let report = match input {
        Input::Tab(game) => {
            room.select_game(game);
            render(room);
            room.listen(game);
            None
        }
        Input::New => {
            room.new_round(game)?;
            render(room);
            None
        }
        Input::Listen => {
            room.listen(game);
            None
        }
        Input::Audio => {
            let enabled = room.toggle_audio();
            println!("Audio: {}", if enabled { "On" } else { "Off" });
            None
        }
        Input::Score => {
            print_score(room);
            None
        }
        Input::Show => {
            render(room);
            None
        }
        Input::Json => {
            println!("{}", serde_json::to_string_pretty(room.round(game))?);
            None
        }
        Input::PenDown | Input::PenMove | Input::PenUp | Input::Trace if game != GameType::Handwriting => {
            println!("✏️ Switch to handwriting to trace.");
            None
        }
        Input::PenDown => {
            room.pen_down();
            None
        }
        Input::PenMove => {
            room.pen_move();
            None
        }
        Input::PenUp => room.pen_up(),
        Input::Trace => {
            room.pen_down();
            room.pen_move();
            room.pen_up()
        }
        Input::Clear => {
            room.clear_canvas();
            println!("Canvas cleared. Try again!");
            None
        }
        Input::Help => {
            print_help();
            None
        }
        Input::Quit => None,
        Input::Pick(choice) => match room.answer(game, &choice) {
            Ok(report) => Some(report),
            Err(e) => {
                println!("🤔 {}", e);
                None
            }
        },
    };

    if let Some(report) = &report {
        print_report(report);
    }
    Ok(report)
}

fn render(room: &TerminalPlayroom) {
    let round = room.round(room.active_game());
    println!();
    println!("== {} ==", round.game);
    println!("{}", describe_target(round));
    if round.game.is_choice() {
        let options: Vec<String> = round.options.iter().map(|o| format!("[{}]", o.label)).collect();
        println!("Options: {}", options.join(" "));
    } else {
        println!("Trace slowly and stay on the guide! (down / move / up, or 'trace')");
    }
    print_score(room);
}

fn describe_target(round: &Round) -> String {
    let target = &round.target;
    match &target.detail {
        EntryDetail::Phonics { sound, .. } => format!("Sound: /{}/", sound),
        EntryDetail::Number { value } => format!("Train: {}", "🚃".repeat(*value as usize)),
        EntryDetail::Shape { color } => format!("Shape: {} ({})", target.id, color),
        EntryDetail::Color { value } => format!("Color swatch: {}", value),
        EntryDetail::Glyph => format!("Trace: {}", target.label),
    }
}

fn print_report(report: &AnswerReport) {
    use playroom::Outcome;

    match report.outcome {
        Outcome::Correct { first_time: true } => println!("✅ Correct! ⭐ {} points", report.total_points),
        Outcome::Correct { first_time: false } | Outcome::Ignored => {}
        Outcome::Incorrect { attempt_number, .. } => println!("❌ Attempt {}", attempt_number),
    }
}

fn print_score(room: &TerminalPlayroom) {
    let coins = room.coins();
    println!(
        "⭐ {} points · 🪙 {} coins ({} to the next coin)",
        room.total_points(),
        coins.coins,
        coins.points_to_next_coin
    );
}

fn print_help() {
    println!("Games: phonics, numbers, shapes, colors, handwriting (type a name to switch)");
    println!("Answer by typing an option, e.g. 'S', 'circle', 'Red' or '7'");
    println!("new     start a new round        listen  hear the question again");
    println!("trace   draw on the tracing pad  clear   wipe the tracing pad");
    println!("down/move/up  draw step by step  audio   toggle speech");
    println!("score   show points and coins    json    dump the round");
    println!("quit    leave");
}
