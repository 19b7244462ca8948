#![deny(unsafe_code)]
//! Headless command-line front end for the quantum-fluid simulator.
//!
//! Subcommands:
//! - `run <engine>`: drive a model through the frame loop, optionally from a
//!   scripted event file, and export the recording as GIF and/or the last
//!   frame as PNG
//! - `list`: print available engines, regimes and parameter schemas
//!
//! Logging goes through `env_logger`; set `RUST_LOG=info` for recording
//! progress or `RUST_LOG=debug` for regime switches and perturbations.

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use log::info;
use quantum_fluid_core::params::{param_f64, param_usize};
use quantum_fluid_core::{default_regimes, Complex64, Engine, EngineError, RgbBuffer};
use quantum_fluid_engines::export::write_png;
use quantum_fluid_engines::{EngineKind, FrameLoop, Presenter, ScriptedInput, SessionConfig};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "quantum-fluid", about = "Real-time 2D field simulator (headless)")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a model through the frame loop and export the result.
    Run {
        /// Engine name ("gray-scott" or "ginzburg-landau"); overrides the config file.
        engine: Option<String>,

        /// Session config file (JSON); missing keys take their defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of frames to run unless a scripted quit comes first.
        #[arg(short, long, default_value_t = 300)]
        frames: u64,

        /// Grid width in cells.
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Grid height in cells.
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// PRNG seed for deterministic output.
        #[arg(long)]
        seed: Option<u64>,

        /// Frame-rate cap; 0 runs as fast as possible.
        #[arg(long, default_value_t = 0)]
        fps: u32,

        /// Scripted input events (JSON array of {"frame", "event"}).
        #[arg(short, long)]
        events: Option<PathBuf>,

        /// Write the recorded frames as a looping GIF.
        #[arg(long)]
        gif: Option<PathBuf>,

        /// Write the last presented frame as a PNG.
        #[arg(long)]
        png: Option<PathBuf>,

        /// Engine parameter overrides as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available engines, regimes and parameter schemas.
    List,
}

/// Keeps the most recent frame instead of drawing it.
#[derive(Default)]
struct HeadlessPresenter {
    last: Option<RgbBuffer>,
    presented: u64,
}

impl Presenter for HeadlessPresenter {
    fn present(&mut self, frame: &RgbBuffer) -> Result<(), EngineError> {
        self.last = Some(frame.clone());
        self.presented += 1;
        Ok(())
    }
}

/// Overlays `params` onto the selected model's section of `config`.
///
/// Keys follow each engine's `params()` output; unknown keys are ignored.
fn apply_params(config: &mut SessionConfig, params: &Value) -> Result<(), CliError> {
    if !params.is_object() {
        return Err(CliError::Input("--params must be a JSON object".into()));
    }
    if config.engine == "ginzburg-landau" {
        let gl = &mut config.ginzburg_landau;
        gl.alpha = Complex64::new(
            param_f64(params, "alpha_re", gl.alpha.re),
            param_f64(params, "alpha_im", gl.alpha.im),
        );
        gl.beta = param_f64(params, "beta", gl.beta);
        gl.gamma = param_f64(params, "gamma", gl.gamma);
        gl.dt = param_f64(params, "dt", gl.dt);
        config.perturb_radius = param_f64(params, "perturb_radius", config.perturb_radius);
    } else {
        let gs = &mut config.gray_scott;
        gs.diffusion_u = param_f64(params, "diffusion_u", gs.diffusion_u);
        gs.diffusion_v = param_f64(params, "diffusion_v", gs.diffusion_v);
        gs.feed_rate = param_f64(params, "feed_rate", gs.feed_rate);
        gs.kill_rate = param_f64(params, "kill_rate", gs.kill_rate);
        gs.dt = param_f64(params, "dt", gs.dt);
    }
    if params.get("sub_steps").is_some() {
        let n = param_usize(params, "sub_steps", 0);
        if n == 0 {
            return Err(CliError::Input("sub_steps must be a positive integer".into()));
        }
        config.sub_steps = Some(n);
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig, CliError> {
    match path {
        Some(p) => Ok(SessionConfig::load(p)?),
        None => Ok(SessionConfig::default()),
    }
}

fn list(json_mode: bool) -> Result<(), CliError> {
    let engines = EngineKind::list_engines();
    let regimes = default_regimes();
    if json_mode {
        let mut schemas = serde_json::Map::new();
        for name in engines {
            let engine = EngineKind::from_name(name, 8, 8, 0, &json!({}))?;
            schemas.insert(name.to_string(), engine.param_schema());
        }
        let info = json!({
            "engines": engines,
            "regimes": regimes,
            "schemas": schemas,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Engines:");
        for name in engines {
            println!("  {name}");
        }
        println!("Regimes (ginzburg-landau, by key):");
        for r in &regimes {
            println!(
                "  {}  {:<11} alpha = 1{:+}i, beta = {}, gamma = {}",
                r.key, r.name, r.alpha_im, r.beta, r.gamma
            );
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_session(
    json_mode: bool,
    engine: Option<String>,
    config_path: Option<PathBuf>,
    frames: u64,
    width: Option<usize>,
    height: Option<usize>,
    seed: Option<u64>,
    fps: u32,
    events: Option<PathBuf>,
    gif: Option<PathBuf>,
    png: Option<PathBuf>,
    params: &str,
) -> Result<(), CliError> {
    let mut config = load_config(config_path.as_deref())?;
    if let Some(name) = engine {
        config.engine = name;
    }
    config.width = width.or(config.width);
    config.height = height.or(config.height);
    config.seed = seed.unwrap_or(config.seed);
    config.target_fps = fps;
    config.record = gif.is_some();
    let params: Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    apply_params(&mut config, &params)?;
    config.validate()?;

    let mut input = match &events {
        Some(path) => ScriptedInput::load(path)?,
        None => ScriptedInput::default(),
    };
    let engine = EngineKind::from_config(&config)?;
    let (width, height) = (engine.grid().width(), engine.grid().height());
    info!("running {} on {width}x{height}, seed {}", engine.name(), config.seed);

    let mut session = FrameLoop::new(engine, &config);
    let mut presenter = HeadlessPresenter::default();
    let summary = session.run(&mut input, &mut presenter, Some(frames))?;

    let gif_written = match &gif {
        Some(path) => session.export_gif(path)?,
        None => false,
    };
    if let (Some(path), Some(frame)) = (&png, &presenter.last) {
        write_png(frame, path)?;
    }

    if json_mode {
        let info = json!({
            "engine": config.engine,
            "width": width,
            "height": height,
            "seed": config.seed,
            "summary": summary,
            "params": session.engine().params(),
            "gif": gif.filter(|_| gif_written).map(|p| p.display().to_string()),
            "png": png.filter(|_| presenter.last.is_some()).map(|p| p.display().to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "ran {} ({width}x{height}, {} frames, seed {}){}",
            config.engine,
            summary.frames,
            config.seed,
            if summary.quit { ", quit by input" } else { "" }
        );
        if let Some(path) = gif.filter(|_| gif_written) {
            eprintln!("  {} recorded frames -> {}", summary.recorded, path.display());
        }
        if let Some(path) = png.filter(|_| presenter.last.is_some()) {
            eprintln!("  last frame -> {}", path.display());
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => list(cli.json),
        Command::Run {
            engine,
            config,
            frames,
            width,
            height,
            seed,
            fps,
            events,
            gif,
            png,
            params,
        } => run_session(
            cli.json, engine, config, frames, width, height, seed, fps, events, gif, png, &params,
        ),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
