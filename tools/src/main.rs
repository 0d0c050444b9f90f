//! sentinel-runner: headless runner for the Sentinel simulation core.
//!
//! Usage:
//!   sentinel-runner --seed 12345 --ticks 600 --drones 32
//!   sentinel-runner --seed 12345 --config sim.json --ipc-mode
//!   sentinel-runner --compare run_a.log run_b.log

use anyhow::{bail, Result};
use sentinel_core::{
    command::ScrubCommand,
    config::SimConfig,
    event::SimEvent,
    fixed::Fixed,
    hash::HashRecord,
    scenario,
    session::{RunMode, Session},
    system::SystemState,
    types::{HistoryIndex, Tick},
    verify::{compare_hash_logs, verify_replay},
};
use std::env;
use std::io::{self, BufRead, Write};
use std::time::Duration;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Tick { count: u64 },
    Frame { elapsed_ms: u64 },
    Command { command: ScrubCommand },
    Verify,
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    tick:          Tick,
    hash_line:     String,
    mode:          RunMode,
    cursor:        HistoryIndex,
    history_len:   usize,
    displayed:     Option<String>,
    dropped_ticks: u64,
    events:        Vec<SimEvent>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|a| a == "--compare") {
        let (Some(left), Some(right)) = (args.get(pos + 1), args.get(pos + 2)) else {
            bail!("--compare needs two hash log paths");
        };
        return run_compare(left, right);
    }

    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 600u64);
    let drones = parse_arg(&args, "--drones", 8u32);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => SimConfig::load(&w[1])?,
        None => SimConfig::default(),
    };

    let mut session = Session::new(scenario::seeded_swarm(seed, drones), &config)?;

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else {
        println!("# Sentinel deterministic run");
        println!("#   seed:    {seed}");
        println!("#   ticks:   {ticks}");
        println!("#   drones:  {drones}");
        println!("#   history: {:?}", config.history);
        println!("{}", session.orchestrator().record());
        for event in session.run_ticks(ticks)? {
            if let SimEvent::TickCompleted { tick, hash } = event {
                println!("{}", HashRecord { tick, hash });
            }
        }
        print_summary(&session, seed, drones)?;
    }

    Ok(())
}

fn run_ipc_loop(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        let events = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => Vec::new(),
            IpcCommand::Tick { count } => {
                if session.mode().is_paused() {
                    write_error(&mut stdout, "cannot tick while paused")?;
                    continue;
                }
                session.run_ticks(count)?
            }
            IpcCommand::Frame { elapsed_ms } => {
                session.frame(Duration::from_millis(elapsed_ms))?
            }
            IpcCommand::Command { command } => session.apply(command).into_iter().collect(),
            IpcCommand::Verify => session
                .verify()
                .violations
                .iter()
                .map(|v| v.to_event())
                .collect(),
        };

        let state = build_ui_state(session, events);
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{}", err_json)?;
    out.flush()?;
    Ok(())
}

fn build_ui_state(session: &Session, events: Vec<SimEvent>) -> UiState {
    let orchestrator = session.orchestrator();
    UiState {
        tick:          orchestrator.tick(),
        hash_line:     orchestrator.record().to_string(),
        mode:          session.mode(),
        cursor:        session.cursor(),
        history_len:   session.history().len(),
        displayed:     session.displayed().map(|e| e.record().to_string()),
        dropped_ticks: session.driver().dropped_ticks(),
        events,
    }
}

fn print_summary(session: &Session, seed: u64, drones: u32) -> Result<()> {
    let history = session.history();

    let report = session.verify();
    let mut scratch = scenario::seeded_swarm(seed, drones);
    let replay = verify_replay(history, &mut scratch);

    let markers = history.markers(|entry| {
        entry
            .snapshot
            .state(0)
            .and_then(SystemState::as_projectile)
            .map_or(Fixed::ZERO, |p| p.y)
    });
    let tick_at = |index: Option<usize>| {
        index
            .and_then(|i| history.get(i))
            .map_or_else(|| "none".to_string(), |e| e.tick.to_string())
    };

    println!("# === RUN SUMMARY ===");
    println!("#   final:           {}", session.orchestrator().record());
    println!("#   systems:         {}", session.orchestrator().len());
    println!("#   history entries: {}", history.len());
    println!("#   hash checks:     {} ({} violations)", report.checked, report.violations.len());
    println!("#   replay checks:   {} ({} violations)", replay.checked, replay.violations.len());
    println!("#   projectile apex:   tick {}", tick_at(markers.apex));
    println!("#   projectile impact: tick {}", tick_at(markers.impact));

    if !report.is_clean() || !replay.is_clean() {
        log::warn!("run finished with determinism violations");
    }
    Ok(())
}

fn run_compare(left: &str, right: &str) -> Result<()> {
    let a = read_hash_log(left)?;
    let b = read_hash_log(right)?;
    match compare_hash_logs(&a, &b) {
        None => {
            println!("identical: {} records", a.len());
            Ok(())
        }
        Some(d) => {
            let show = |r: Option<HashRecord>| r.map_or_else(|| "<end of log>".to_string(), |r| r.to_string());
            println!("diverged at record {}", d.index);
            println!("  {left}: {}", show(d.left));
            println!("  {right}: {}", show(d.right));
            bail!("hash logs diverge")
        }
    }
}

/// Every `tick=` line in the file; comments and other output are skipped.
fn read_hash_log(path: &str) -> Result<Vec<HashRecord>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
    content
        .lines()
        .filter(|l| l.starts_with("tick="))
        .map(|l| l.parse::<HashRecord>().map_err(anyhow::Error::from))
        .collect()
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
