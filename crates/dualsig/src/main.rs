use clap::Parser;
use libdualsig::{Dualsig, DualsigConfig, Language};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Module file to render, in the JSON model format
    input: String,

    /// Display language; overrides the configuration file
    #[arg(long, value_parser = ["java", "kotlin"], env = "DUALSIG_LANGUAGE")]
    language: Option<String>,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Rendering configuration file
    #[arg(long)]
    config: Option<String>,

    /// Prefix of generated links; overrides the configuration file
    #[arg(long)]
    root_path: Option<String>,

    /// Render summary rows, without default values or visibility
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Use fully qualified names for Java array element types
    #[arg(long, default_value_t = false)]
    qualified_arrays: bool,
}

fn build_dualsig(cli: &Cli) -> Result<Dualsig, Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => DualsigConfig::from_file(path)?,
        None => DualsigConfig::default(),
    };

    let mut dualsig = Dualsig::new().with_config(config).with_summary(cli.summary);
    match cli.language.as_deref() {
        Some("java") => dualsig = dualsig.with_display_language(Language::Java),
        Some("kotlin") => dualsig = dualsig.with_display_language(Language::Kotlin),
        Some(_) => unreachable!(),
        None => {}
    }
    if let Some(root_path) = &cli.root_path {
        dualsig = dualsig.with_root_path(root_path.clone());
    }
    if cli.qualified_arrays {
        dualsig = dualsig.with_qualified_array_names(true);
    }
    Ok(dualsig)
}

fn run_cmdline(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let dualsig = build_dualsig(cli)?;

    let output = match cli.format.as_str() {
        "json" => {
            let module = Dualsig::load_module(&cli.input)?;
            serde_json::to_string_pretty(&dualsig.render_module(&module)?)?
        }
        "text" => dualsig.render_file(&cli.input)?,
        _ => unreachable!(),
    };
    println!("{output}");

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Only initialize tracing if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = run_cmdline(&cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
