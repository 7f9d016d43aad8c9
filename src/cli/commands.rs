use crate::config::AnalyzerConfig;
use crate::core::{Analysis, DependencyAnalyzer, Progress, TracingProgress};
use crate::error::{SheetDepsError, SheetDepsResult};
use crate::parser;
use crate::writer::{self, OutputFormat};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Analyzer settings shared by every subcommand
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// YAML config file (header_row, data_start_row, output_sheet, skip_prefixes)
    #[arg(short, long, env = "SHEETDEPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Name of the matrix sheet; a sheet with this exact name is never analyzed
    #[arg(long)]
    pub output_sheet: Option<String>,

    /// Skip sheets whose name starts with this prefix (repeatable, case-sensitive).
    /// Replaces the configured prefixes when given.
    #[arg(long = "skip-prefix")]
    pub skip_prefixes: Vec<String>,
}

impl ConfigArgs {
    /// Defaults, then the config file, then command-line overrides
    pub fn resolve(&self) -> SheetDepsResult<AnalyzerConfig> {
        let mut config = match &self.config {
            Some(path) => AnalyzerConfig::from_file(path)?,
            None => AnalyzerConfig::default(),
        };
        if let Some(ref sheet) = self.output_sheet {
            config.output_sheet = sheet.clone();
        }
        if !self.skip_prefixes.is_empty() {
            config.skip_prefixes = self.skip_prefixes.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Forwards checkpoints to tracing and, when verbose, to the terminal
struct ConsoleProgress {
    verbose: bool,
}

impl Progress for ConsoleProgress {
    fn notify(&self, message: &str) {
        TracingProgress.notify(message);
        if self.verbose {
            println!("   {}", message.cyan());
        }
    }
}

/// Completion notice carrying column count and elapsed time
fn completion_message(columns: usize, elapsed: Duration) -> String {
    format!(
        "Done. Columns: {}. Time: {:.1}s",
        columns,
        elapsed.as_secs_f64()
    )
}

/// `<dir>/<stem>_matrix.<ext>` next to the input workbook
fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("workbook");
    input.with_file_name(format!("{}_matrix.{}", stem, format.extension()))
}

/// Absolute, symlink-free form of `path`; the file itself may not exist yet
fn resolved_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

/// Whether `output` names the same file as `input`, however either is spelled
fn is_same_file(input: &Path, output: &Path) -> bool {
    resolved_path(input) == resolved_path(output)
}

fn analyze_file(
    input: &Path,
    args: &ConfigArgs,
    progress: &dyn Progress,
) -> SheetDepsResult<(AnalyzerConfig, Analysis)> {
    let config = args.resolve()?;
    let workbook = parser::load_workbook(input)?;
    let analyzer = DependencyAnalyzer::new(config.clone())?;
    let analysis = analyzer.analyze(&workbook, progress)?;
    Ok((config, analysis))
}

/// Execute the matrix command: analyze, then write the matrix once
pub fn matrix(
    input: PathBuf,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
    args: ConfigArgs,
    verbose: bool,
) -> SheetDepsResult<()> {
    let started = Instant::now();

    let format = match (format, &output) {
        (Some(format), _) => format,
        (None, Some(path)) => OutputFormat::from_path(path)?,
        (None, None) => OutputFormat::Xlsx,
    };
    let output = output.unwrap_or_else(|| default_output_path(&input, format));
    if is_same_file(&input, &output) {
        return Err(SheetDepsError::Validation(
            "Output path must differ from the input workbook".to_string(),
        ));
    }

    println!("{}", "🔗 SheetDeps - Dependency Matrix".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    let progress = ConsoleProgress { verbose };
    let (config, analysis) = analyze_file(&input, &args, &progress)?;

    progress.notify("Writing matrix...");
    writer::write_matrix(&analysis.matrix, &output, format, &config.output_sheet)?;

    let columns = analysis.matrix.len();
    progress.notify(&completion_message(columns, started.elapsed()));

    println!("{}", "✅ Matrix written".bold().green());
    println!("   Columns:  {}", columns.to_string().bold());
    println!("   Formulas: {}", analysis.formula_count());
    println!("   Edges:    {}", analysis.matrix.edge_count());
    println!(
        "   Time:     {:.1}s\n",
        started.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Execute the columns command: list the registry with sampled formulas
pub fn columns(input: PathBuf, args: ConfigArgs, verbose: bool) -> SheetDepsResult<()> {
    println!("{}", "📋 SheetDeps - Column Registry".bold().green());
    println!("   File: {}\n", input.display());

    let progress = ConsoleProgress { verbose };
    let (_, analysis) = analyze_file(&input, &args, &progress)?;

    for (idx, (column, formula)) in analysis
        .columns()
        .iter()
        .zip(&analysis.formulas)
        .enumerate()
    {
        let formula = match formula {
            Some(f) => f.bright_yellow().to_string(),
            None => "-".dimmed().to_string(),
        };
        println!(
            "   {:>4}  {:<4} {}  {}",
            idx,
            column.letter,
            column.id.bright_blue(),
            formula
        );
    }

    println!();
    println!(
        "{}",
        format!(
            "✅ {} columns, {} with formulas",
            analysis.registry.len(),
            analysis.formula_count()
        )
        .bold()
        .green()
    );
    Ok(())
}

/// Execute the deps command: what a column reads and what reads it
pub fn deps(input: PathBuf, column_id: String, args: ConfigArgs) -> SheetDepsResult<()> {
    println!("{}", "🔍 SheetDeps - Column Dependencies".bold().green());
    println!("   File:   {}", input.display());
    println!("   Column: {}\n", column_id.bright_blue().bold());

    let (_, analysis) = analyze_file(&input, &args, &ConsoleProgress { verbose: false })?;

    let matches = analysis.registry.find_by_id(&column_id);
    if matches.is_empty() {
        return Err(SheetDepsError::Validation(format!(
            "Column '{}' not found. Expected 'Sheet!Header', e.g. '{}'",
            column_id,
            analysis
                .registry
                .get(0)
                .map(|c| c.id.as_str())
                .unwrap_or("Sheet!Header")
        )));
    }

    let labels = analysis.matrix.labels();
    for index in matches {
        let column = &analysis.columns()[index];
        println!(
            "{}",
            format!("📌 {} (column {})", column.id, column.letter)
                .bold()
                .cyan()
        );
        match &analysis.formulas[index] {
            Some(f) => println!("   Formula: {}", f.bright_yellow()),
            None => println!("   Formula: {}", "none".dimmed()),
        }

        println!("   Reads:");
        print_labels(&analysis.matrix.dependencies_of(index), labels);
        println!("   Read by:");
        print_labels(&analysis.matrix.dependents_of(index), labels);
        println!();
    }

    Ok(())
}

fn print_labels(indices: &[usize], labels: &[String]) {
    if indices.is_empty() {
        println!("      {}", "(none)".dimmed());
    }
    for &i in indices {
        println!("      {}", labels[i]);
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
