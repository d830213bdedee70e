// algotty: step-by-step algorithm visualizer for the terminal

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use algotty::buffer::parse_values;
use algotty::program::{Algorithm, ALL_ALGORITHMS};
use algotty::session::{RunConfig, Session};
use algotty::ui::App;

fn usage(program_name: &str) {
    eprintln!("Usage: {} [ALGORITHM] [OPTIONS]", program_name);
    eprintln!();
    eprintln!("Algorithms:");
    for algo in ALL_ALGORITHMS {
        eprintln!("  {:<10} {} {}", algo.key(), algo.label(), algo.complexity());
    }
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --values N,N,..   Use these values (max 15) instead of random ones");
    eprintln!("  --size N          Random buffer size, clamped to [10, 100]");
    eprintln!("  --speed MS        Delay between steps, up to 1000 (default 200)");
    eprintln!("  --target N        Search target (default: the middle element)");
    eprintln!("  --seed N          Seed for the random buffer");
}

fn parse_args(args: &[String]) -> Result<RunConfig, String> {
    let mut algorithm = Algorithm::Bubble;
    let mut iter = args.iter().peekable();

    if let Some(first) = iter.peek() {
        if !first.starts_with("--") {
            algorithm = Algorithm::from_key(first).map_err(|e| e.to_string())?;
            iter.next();
        }
    }

    let mut config = RunConfig::new(algorithm);

    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| format!("Missing value for {}", flag))?;
        match flag.as_str() {
            "--values" => {
                let values =
                    parse_values(value).ok_or_else(|| format!("No numbers in '{}'", value))?;
                config.values = Some(values);
            }
            "--size" => {
                config.size = value
                    .parse()
                    .map_err(|_| format!("Invalid size '{}'", value))?;
            }
            "--speed" => {
                config.pace_ms = value
                    .parse()
                    .map_err(|_| format!("Invalid speed '{}'", value))?;
            }
            "--target" => {
                config.target = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid target '{}'", value))?,
                );
            }
            "--seed" => {
                config.seed = value
                    .parse()
                    .map_err(|_| format!("Invalid seed '{}'", value))?;
            }
            other => return Err(format!("Unknown option '{}'", other)),
        }
    }

    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("algotty");

    if args.iter().any(|a| a == "--help" || a == "-h") {
        usage(program_name);
        return Ok(());
    }

    let config = match parse_args(&args[1..]) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!();
            usage(program_name);
            std::process::exit(1);
        }
    };

    let session = Session::new(config);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
