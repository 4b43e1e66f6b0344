use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::collections::BTreeMap;
use std::path::PathBuf;

use frameseq_cli::config::{AppConfig, ConfigManager, get_config};
use frameseq_cli::file_discovery::{
    DEFAULT_SEQUENCE_EXTENSIONS, SequenceDiscoveryOptions, discover_sequences, dotted_extensions,
    normalize_extension,
};
use frameseq_cli::output::{OutputFormat, OutputFormatter, TextFormatter, create_formatter};
use frameseq_cli::terminal;
use frameseq_core::{
    DirectoryListOptions, DirectoryListSort, FileInfo, FsDirectoryReader, INVALID_FRAME,
    PathName, SequenceFormat, codec, find_sequence,
};

#[derive(Parser)]
#[command(name = "frameseq")]
#[command(author, version, about = "Frame sequence listing and expansion for numbered image files", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a directory with numbered files grouped into sequences
    Ls {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Follow symbolic links while descending
        #[arg(long, requires = "recursive")]
        follow_links: bool,

        /// Deepest subdirectory level to list (1 = direct children only)
        #[arg(long, value_name = "N", requires = "recursive")]
        max_depth: Option<usize>,

        /// Output format (defaults to output.default_format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormatArg>,

        /// List every file on its own instead of grouping sequences
        #[arg(long)]
        no_sequences: bool,

        /// Include entries whose name starts with a dot
        #[arg(short = 'a', long = "all")]
        all: bool,

        /// Sort order
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Reverse the sort order
        #[arg(long)]
        reverse: bool,

        /// List directories before files
        #[arg(long)]
        dirs_first: bool,

        /// Collapse each sequence to its first and last frame
        #[arg(long)]
        range: bool,

        /// Only show entries whose name contains this text (case-insensitive)
        #[arg(long, value_name = "TEXT")]
        filter: Option<String>,

        /// Include patterns (glob patterns, can be specified multiple times)
        #[arg(short = 'i', long = "include", value_name = "PATTERN")]
        include_patterns: Vec<String>,

        /// Exclude patterns (glob patterns, can be specified multiple times, overrides includes)
        #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
        exclude_patterns: Vec<String>,

        /// Extension eligible for grouping (can be specified multiple times)
        #[arg(long = "ext", value_name = ".EXT")]
        extensions: Vec<String>,

        /// Group every extension instead of the default image formats
        #[arg(long)]
        no_defaults: bool,
    },

    /// Print the file name of every frame of a sequence
    Expand {
        /// File of the sequence, a frame number or a `#` wildcard
        pattern: String,

        /// Frames to expand instead of the ones found on disk
        #[arg(long, value_name = "SPEC")]
        frames: Option<String>,

        /// Print file names without their directory
        #[arg(long)]
        no_directory: bool,
    },

    /// Show the sequence a file or `#` wildcard belongs to
    Info {
        /// File of the sequence or a `#` wildcard
        path: String,

        /// Output format (defaults to output.default_format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormatArg>,
    },

    /// Parse a frame specification such as 1-10,20
    Frames {
        /// Frame specification
        spec: String,

        /// Normalise every range to ascending order and sort the ranges
        #[arg(long)]
        sort: bool,

        /// Print every frame on its own line
        #[arg(long)]
        list: bool,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., listing.sort)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., listing.sort)
        key: String,
        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,

    /// Print the configuration file path
    Path,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormatArg {
    Text,
    Json,
    Csv,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Csv => OutputFormat::Csv,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    Name,
    Unsorted,
}

impl From<SortArg> for DirectoryListSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => DirectoryListSort::Name,
            SortArg::Unsorted => DirectoryListSort::Unsorted,
        }
    }
}

/// Flags of the `ls` command that override the `[listing]` configuration
struct ListingFlags {
    no_sequences: bool,
    all: bool,
    sort: Option<SortArg>,
    reverse: bool,
    dirs_first: bool,
    range: bool,
    filter: Option<String>,
    extensions: Vec<String>,
    no_defaults: bool,
}

impl ListingFlags {
    fn apply(self, mut listing: DirectoryListOptions) -> DirectoryListOptions {
        if self.no_sequences {
            listing.sequences = false;
        }
        if self.all {
            listing.show_hidden = true;
        }
        if let Some(sort) = self.sort {
            listing.sort = sort.into();
        }
        if self.reverse {
            listing.reverse_sort = true;
        }
        if self.dirs_first {
            listing.directories_first = true;
        }
        if self.range {
            listing.sequence_format = SequenceFormat::Range;
        }
        if self.filter.is_some() {
            listing.filter_text = self.filter;
        }

        if !self.extensions.is_empty() {
            listing.sequence_extensions = self
                .extensions
                .iter()
                .map(|ext| normalize_extension(ext))
                .collect();
        } else if !self.no_defaults {
            listing = with_default_extensions(listing);
        }

        listing
    }
}

/// Restrict grouping to the known image formats when nothing else is configured
fn with_default_extensions(mut listing: DirectoryListOptions) -> DirectoryListOptions {
    if listing.sequence_extensions.is_empty() {
        listing.sequence_extensions = dotted_extensions(DEFAULT_SEQUENCE_EXTENSIONS);
    }
    listing
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("frameseq_core", log::LevelFilter::Debug)
            .filter_module("frameseq_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match cli.command {
        Commands::Ls {
            path,
            recursive,
            follow_links,
            max_depth,
            format,
            no_sequences,
            all,
            sort,
            reverse,
            dirs_first,
            range,
            filter,
            include_patterns,
            exclude_patterns,
            extensions,
            no_defaults,
        } => {
            let config = get_config().context("Failed to load configuration")?;
            let flags = ListingFlags {
                no_sequences,
                all,
                sort,
                reverse,
                dirs_first,
                range,
                filter,
                extensions,
                no_defaults,
            };
            let options = SequenceDiscoveryOptions::new()
                .with_listing(flags.apply(config.listing.clone()))
                .with_include_patterns(include_patterns)
                .with_exclude_patterns(exclude_patterns)
                .with_recursive(recursive)
                .with_follow_links(follow_links)
                .with_max_depth(max_depth);

            log::debug!("Listing {path:?} with {:?}", options.listing);
            ls_command(&config, path, format, options)?;
        }
        Commands::Expand {
            pattern,
            frames,
            no_directory,
        } => {
            let config = get_config().context("Failed to load configuration")?;
            expand_command(&config, &pattern, frames.as_deref(), !no_directory)?;
        }
        Commands::Info { path, format } => {
            let config = get_config().context("Failed to load configuration")?;
            info_command(&config, &path, format)?;
        }
        Commands::Frames { spec, sort, list } => {
            frames_command(&spec, sort, list)?;
        }
        Commands::Config(config_cmd) => {
            config_command(config_cmd)?;
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

fn resolve_format(config: &AppConfig, format: Option<OutputFormatArg>) -> Result<OutputFormat> {
    match format {
        Some(arg) => Ok(arg.into()),
        None => OutputFormat::from_string(&config.output.default_format)
            .context("Invalid output.default_format"),
    }
}

fn ls_command(
    config: &AppConfig,
    path: PathBuf,
    format: Option<OutputFormatArg>,
    options: SequenceDiscoveryOptions,
) -> Result<()> {
    let format = resolve_format(config, format)?;
    let recursive = options.recursive;

    let listings = discover_sequences(&path, options)
        .with_context(|| format!("Failed to list {}", path.display()))?;
    let entries: Vec<FileInfo> = listings
        .into_iter()
        .flat_map(|listing| listing.entries)
        .filter(|info| !(recursive && info.is_directory()))
        .collect();

    log::debug!("Found {} entries", entries.len());

    let use_color = terminal::use_color(config.output.color_enabled);
    let formatter = create_formatter(format, use_color, recursive);
    let output = formatter.format_batch(&entries)?;
    if !output.is_empty() {
        println!("{}", output.trim_end_matches('\n'));
    }

    Ok(())
}

/// Pad implied by the number of a pattern: `####` or a zero-padded frame
fn pattern_pad(path: &PathName) -> usize {
    let number = path.number();
    let padded = number.len() > 1 && (path.is_number_wildcard() || number.starts_with('0'));
    if padded { number.len() } else { 0 }
}

/// Resolve the sequence a path or wildcard belongs to on disk
fn resolve_on_disk(config: &AppConfig, pattern: &str) -> Result<FileInfo> {
    let path = PathName::new(pattern);
    let listing = with_default_extensions(config.listing.clone());
    let info = find_sequence(&FsDirectoryReader::new(), &path, &listing)
        .with_context(|| format!("Failed to read the directory of {pattern}"))?;

    if info.is_sequence_wildcard() && !info.is_sequence_valid() {
        anyhow::bail!("No files match {pattern}");
    }
    Ok(info)
}

fn expand_command(
    config: &AppConfig,
    pattern: &str,
    frames: Option<&str>,
    with_directory: bool,
) -> Result<()> {
    let info = match frames {
        Some(spec) => {
            let mut info = FileInfo::new(pattern);
            let mut sequence = codec::parse_sequence(spec)
                .with_context(|| format!("Invalid frame specification: {spec}"))?;
            if sequence.pad() == 0 {
                sequence.set_pad(pattern_pad(info.path()));
            }
            info.set_sequence(sequence);
            info
        }
        None => resolve_on_disk(config, pattern)?,
    };

    match info.sequence().filter(|sequence| sequence.is_valid()) {
        Some(sequence) => {
            for frame in sequence.frames() {
                println!("{}", info.file_name(frame, with_directory));
            }
        }
        None => println!("{}", info.file_name(INVALID_FRAME, with_directory)),
    }

    Ok(())
}

fn info_command(config: &AppConfig, path: &str, format: Option<OutputFormatArg>) -> Result<()> {
    let format = resolve_format(config, format)?;
    let info = resolve_on_disk(config, path)?;
    let use_color = terminal::use_color(config.output.color_enabled);

    let output = match format {
        OutputFormat::Text => TextFormatter::new(use_color)
            .with_directory(true)
            .detailed(true)
            .format_single(&info)?,
        other => create_formatter(other, use_color, true).format_single(&info)?,
    };
    println!("{}", output.trim_end_matches('\n'));

    Ok(())
}

fn frames_command(spec: &str, sort: bool, list: bool) -> Result<()> {
    let mut sequence = codec::parse_sequence(spec)
        .with_context(|| format!("Invalid frame specification: {spec}"))?;
    if sort {
        sequence.sort();
    }

    if list {
        for frame in sequence.frames() {
            println!("{}", codec::format_frame(frame, sequence.pad()));
        }
    } else {
        let count = sequence.len();
        let noun = if count == 1 { "frame" } else { "frames" };
        println!("{sequence} ({count} {noun})");
    }

    Ok(())
}

fn config_command(command: ConfigCommand) -> Result<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => match manager.get(&key) {
            Ok(value) => {
                println!("{value}");
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {e:#}").red());
                std::process::exit(1);
            }
        },
        ConfigCommand::Set { key, value } => match manager.set(&key, &value) {
            Ok(()) => {
                eprintln!("{}", format!("Set {key} = {value}").green());
                eprintln!(
                    "Configuration saved to: {}",
                    manager.config_path().display()
                );
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {e:#}").red());
                std::process::exit(1);
            }
        },
        ConfigCommand::List => match manager.list() {
            Ok(items) => {
                eprintln!("{}", "Configuration:".bold().blue());
                eprintln!("Config file: {}", manager.config_path().display());
                eprintln!();

                let mut sections: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
                for (key, value) in items {
                    let (section, rest) = key.split_once('.').unwrap_or(("general", key.as_str()));
                    sections
                        .entry(section.to_string())
                        .or_default()
                        .push((rest.to_string(), value));
                }

                for (section, items) in sections {
                    println!("[{}]", section.yellow());
                    for (key, value) in items {
                        println!("  {} = {}", key.cyan(), value);
                    }
                    println!();
                }
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {e:#}").red());
                std::process::exit(1);
            }
        },
        ConfigCommand::Path => {
            println!("{}", manager.config_path().display());
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
