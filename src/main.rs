use clap::Parser;
use dcs_persist::utils::error::ErrorSeverity;
use dcs_persist::utils::{logger, validation::Validate};
use dcs_persist::{
    AppConfig, CliArgs, DiscordNotifier, Orchestrator, SysinfoServerControl, WebGuiClient,
};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let exit_code = run(args).await;
    // Log guard is dropped before this point so the file sink is flushed.
    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}

async fn run(args: CliArgs) -> i32 {
    // The launcher contract: enter the root before doing anything else so
    // every relative path (config, log, templates, report) resolves
    // against it. A missing root terminates the run before any process
    // is spawned or any mission file is touched.
    if let Err(e) = std::env::set_current_dir(&args.root) {
        eprintln!("❌ Cannot enter root directory '{}': {}", args.root, e);
        return 3;
    }

    let log_guard = logger::init_logger(args.verbose);

    tracing::info!("==== Starting DCS Persistence Orchestrator ====");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config = match AppConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            drop(log_guard);
            return 3;
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        drop(log_guard);
        return 3;
    }

    let notifier = DiscordNotifier::from_config(&config);
    let server = SysinfoServerControl::new(&config.dcs_server_exe);
    let webgui = WebGuiClient::new(config.webgui_url.clone());
    let engine = Orchestrator::new(config, webgui, server, notifier);

    let exit_code = match engine.run().await {
        Ok(()) => {
            tracing::info!("==== DCS Persistence Orchestrator COMPLETED SUCCESSFULLY ====");
            println!("✅ DCS persistence run completed successfully!");
            0
        }
        Err(e) => {
            tracing::error!(
                "❌ Persistence run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            }
        }
    };

    drop(log_guard);
    exit_code
}
