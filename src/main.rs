use clap::Parser;
use notekeeper::cli::{
    handle_current, handle_delete, handle_edit, handle_list, handle_new, handle_select,
    handle_show, resolve_data_dir, Cli, Commands,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir);

    let result = match cli.command {
        Commands::New { title, stdin, json } => handle_new(&data_dir, title, stdin, json),
        Commands::List { json } => handle_list(&data_dir, json),
        Commands::Show { id, json } => handle_show(&data_dir, id, json),
        Commands::Edit {
            id,
            title,
            content,
            stdin,
            json,
        } => handle_edit(&data_dir, id, title, content, stdin, json),
        Commands::Delete { id, force } => handle_delete(&data_dir, id, force),
        Commands::Select { id, clear } => handle_select(&data_dir, id, clear),
        Commands::Current { json } => handle_current(&data_dir, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
