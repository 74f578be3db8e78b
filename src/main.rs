use std::{
    fs::OpenOptions,
    io::{self, Write},
    process,
    sync::Mutex
};

use anyhow::Context;
use clap::Parser;

use pizzastore::{
    configuration::Settings,
    console::Console,
    dispatcher,
    executor::QueryExecutor,
    telemetry::{get_subscriber, init_subscriber},
    utils::error_chain_message
};

#[derive(Parser, Debug)]
#[command(name = "pizzastore")]
#[command(about = "Console client for the pizza store database", long_about = None)]
struct Args {
    /// Database name
    dbname: String,

    /// Database server port
    port: u16,

    /// Database user
    user: String
}

fn main() -> anyhow::Result<()>{
    let args = Args::parse();

    let mut settings = Settings::get().context("Failed to read configuration")?;
    settings.database.name = args.dbname;
    settings.database.port = args.port;
    settings.database.username = args.user;

    // The console owns stdout, so logs go to a file or nowhere
    match &settings.application.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            let subscriber = get_subscriber("pizzastore".into(), settings.application.log_level.clone(), Mutex::new(file));
            init_subscriber(subscriber);
        },
        None => {
            let subscriber = get_subscriber("pizzastore".into(), settings.application.log_level.clone(), io::sink);
            init_subscriber(subscriber);
        }
    }

    greeting();

    let mut executor = match QueryExecutor::connect(&settings.database) {
        Ok(executor) => executor,
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "Unable to connect to database");
            eprintln!("Error - Unable to Connect to Database: {}", error_chain_message(&e));
            eprintln!("Make sure you started postgres on this machine");
            process::exit(1);
        }
    };
    println!("Connected to database {} on port {}", settings.database.name, settings.database.port);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    let mut errors = stderr.lock();

    let outcome = {
        let mut console = Console::new(&mut input, &mut output, &mut errors);
        dispatcher::run(&mut executor, &mut console)
    };

    if let Err(e) = &outcome {
        tracing::error!(error.cause_chain = ?e, "Console failed");
        writeln!(errors, "{}", e)?;
    }

    write!(output, "Disconnecting from database...")?;
    output.flush()?;
    executor.close();
    writeln!(output, "Done\n\nBye !")?;

    Ok(())
}

fn greeting(){
    let rule = "*".repeat(55);
    println!("\n\n{}\n{:^55}\n{}\n", rule, "User Interface", rule);
}
