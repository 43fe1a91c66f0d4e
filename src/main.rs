//! Username Forge - Fragment username availability checker
//!
//! Checks the first usernames of the 5-character space against Fragment and
//! prints what it finds.

use username_forge::{
    watch_interrupts, AppConfig, BatchRunner, FragmentProber, Result, TokioPacer,
    UsernameGenerator,
};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize the library
    if let Err(e) = username_forge::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }
    username_forge::init_logging();

    let args: Vec<String> = env::args().collect();

    // Check for help
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return;
    }

    if let Err(e) = run_username_forge().await {
        eprintln!("{}", e.user_message());
        process::exit(1);
    }
}

/// Main username forge workflow
async fn run_username_forge() -> Result<()> {
    let config = AppConfig::from_env()?;

    println!("Fragment Username Availability Checker");
    println!("=====================================");
    println!(
        "This script will generate and check {}-character usernames on Fragment.com",
        config.length
    );
    println!("WARNING: Checking all possible usernames will take a very long time!");
    println!(
        "The script will check the first {} usernames by default.",
        config.run.max_usernames
    );
    println!();

    let prober = FragmentProber::new(&config.probe)?;
    let generator = UsernameGenerator::new(config.length, config.charset)?;
    let mut runner = BatchRunner::new(generator, prober, TokioPacer, config.run.clone());

    // First Ctrl+C lets the in-flight check finish; a second one exits at once
    let stop = runner.stop_handle();
    let ctrl_c = tokio::spawn(async move {
        let force_exit =
            watch_interrupts(stop, || async { tokio::signal::ctrl_c().await.is_ok() }).await;
        if force_exit {
            eprintln!("\nInterrupted again, exiting without summary.");
            process::exit(130);
        }
    });

    let mut stdout = std::io::stdout();
    let result = runner.run(&mut stdout).await;
    ctrl_c.abort();

    result.map(|_| ())
}

/// Print help information
fn print_help() {
    println!("Username Forge - Fragment username availability checker");
    println!("═══════════════════════════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    username-forge");
    println!();
    println!("Checks short usernames in order (aaaaa, aaaab, ...) against fragment.com,");
    println!("pausing between requests. Press Ctrl+C to stop early; the summary is");
    println!("still printed. Press Ctrl+C again to abort a hanging request.");
    println!();
    println!("ENVIRONMENT VARIABLES (optional, also read from .env):");
    println!("    USERNAME_FORGE_MAX_USERNAMES  Usernames per run (default: 10)");
    println!("    USERNAME_FORGE_DELAY_MS       Pause after each check (default: 500)");
    println!("    USERNAME_FORGE_LENGTH         Username length (default: 5)");
    println!("    USERNAME_FORGE_CHARSET        letters or alphanumeric (default: alphanumeric)");
    println!("    USERNAME_FORGE_BASE_URL       Fragment host (default: https://fragment.com)");
    println!("    USERNAME_FORGE_TIMEOUT_SECS   Request timeout (default: transport default)");
    println!("    RUST_LOG                      Log filter (default: username_forge=warn)");
}
