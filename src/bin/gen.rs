//! pubsuffix-gen: CLI tool for generating compact trie files from a public suffix list.

use clap::{Parser, Subcommand};
use pubsuffix::manifest::Manifest;
use pubsuffix::rules::{download_list, read_list_file, RuleListParser};
use pubsuffix::{DataConfig, MappedSuffixList, RuleKind};
use std::fs;
use std::path::PathBuf;

/// Default location of the published list.
const DEFAULT_LIST_URL: &str = "https://publicsuffix.org/list/public_suffix_list.dat";

#[derive(Parser)]
#[command(name = "pubsuffix-gen")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Generate compact public suffix tries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build trie files from a local list (plain or gzipped)
    Build {
        /// Input public_suffix_list.dat
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for trie files
        #[arg(short, long, default_value = "data")]
        output_dir: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Download the list and build trie files from it
    Download {
        /// List URL
        #[arg(short, long, default_value = DEFAULT_LIST_URL)]
        url: String,

        /// Output directory for trie files
        #[arg(short, long, default_value = "data")]
        output_dir: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check generated files against their manifest and structure
    Verify {
        /// Directory holding the trie files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,
    },

    /// Resolve hostnames against generated files
    Query {
        /// Directory holding the trie files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        /// Hostnames to resolve
        #[arg(required = true)]
        hostnames: Vec<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            input,
            output_dir,
            verbose,
        } => build_from_file(&input, &output_dir, verbose),
        Commands::Download {
            url,
            output_dir,
            verbose,
        } => download_and_build(&url, &output_dir, verbose),
        Commands::Verify { data_dir } => verify(&data_dir),
        Commands::Query {
            data_dir,
            hostnames,
        } => query(&data_dir, &hostnames),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_from_file(
    input: &PathBuf,
    output_dir: &PathBuf,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if verbose {
        println!("Reading input file: {:?}", input);
    }

    let text = read_list_file(input)?;
    write_tries(&text, &input.display().to_string(), output_dir, verbose)
}

fn download_and_build(
    url: &str,
    output_dir: &PathBuf,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if verbose {
        println!("Downloading {}", url);
    }

    let text = download_list(url)?;
    write_tries(&text, url, output_dir, verbose)
}

fn write_tries(
    text: &str,
    source: &str,
    output_dir: &PathBuf,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    let rules = RuleListParser::parse_str(text)?;
    if verbose {
        println!(
            "Parsed rules: {} common, {} negated, {} asterisk",
            rules.count(RuleKind::Common),
            rules.count(RuleKind::Negated),
            rules.count(RuleKind::Asterisk)
        );
    }

    let encoded = rules.encode()?;
    let config = DataConfig::new(output_dir);

    for kind in RuleKind::ALL {
        let path = config.path_for(kind);
        let data = encoded.get(kind);
        if verbose {
            println!("Writing output file: {:?} ({} bytes)", path, data.len());
        }
        fs::write(&path, data)?;
    }

    let manifest = Manifest::build(source, &rules, &encoded, |kind| {
        config.file_name(kind).to_string()
    });
    manifest.save(config.manifest_path())?;

    println!(
        "Generated {} rules from {} into {:?}",
        rules.total(),
        source,
        output_dir
    );
    Ok(())
}

fn verify(data_dir: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let list = MappedSuffixList::load(&DataConfig::new(data_dir))?;
    list.validate()?;
    println!("{:?}: OK", data_dir);
    Ok(())
}

fn query(data_dir: &PathBuf, hostnames: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let list = MappedSuffixList::load(&DataConfig::new(data_dir))?;

    for hostname in hostnames {
        match list.parse_public_suffix(hostname) {
            Some(found) => println!(
                "{}\tsuffix={}\ticann={}\tetld1={}",
                hostname,
                found.suffix,
                found.icann,
                list.effective_tld_plus_one(hostname).as_deref().unwrap_or("-")
            ),
            None => println!("{}\t-", hostname),
        }
    }

    Ok(())
}
