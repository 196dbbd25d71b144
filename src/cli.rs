use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the input CSV file (publications or common names).
    #[arg(short, long, value_name = "FILE")]
    pub input_file: PathBuf,

    /// What to do with the input: resolve a publication slug or normalize
    /// common names.
    #[arg(short, long, value_enum)]
    pub mode: Mode,

    /// Slug to resolve against the publications (required in "resolve" mode).
    #[arg(short, long, value_name = "SLUG", required_if_eq("mode", "resolve"))]
    pub slug: Option<String>,

    /// Path to the TSV report (required in "normalize" mode).
    #[arg(short, long, value_name = "FILE", required_if_eq("mode", "normalize"))]
    pub output_file: Option<PathBuf>,

    /// JSON vocabulary overriding the built-in word lists.
    #[arg(long, value_name = "FILE")]
    pub vocabulario: Option<PathBuf>,

    /// Language id whose names take the full rule cascade; names in other
    /// languages take the generic one.
    #[arg(long, value_name = "ID")]
    pub idioma_principal: Option<i64>,
}

#[derive(clap::ValueEnum, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Resolve a slug to a publication.
    #[value(name = "resolve")]
    Resolve,
    /// Normalize common names and group them taxonomically.
    #[value(name = "normalize")]
    Normalize,
}
