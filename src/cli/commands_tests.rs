use super::*;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

const SALES_YAML: &str = r#"
sheets:
  - name: Sales
    rows:
      - [ID, Total]
      - [1, "=A2*2"]
  - name: Tax
    rows:
      - [Rate]
      - [0.21]
"#;

fn write_workbook(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("book.yaml");
    fs::write(&path, SALES_YAML).unwrap();
    path
}

// =========================================================================
// ConfigArgs Tests
// =========================================================================

#[test]
fn test_config_args_defaults() {
    let config = ConfigArgs::default().resolve().unwrap();
    assert_eq!(config, AnalyzerConfig::default());
}

#[test]
fn test_config_args_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sheetdeps.yaml");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "output_sheet: Matriz").unwrap();
    writeln!(file, "skip_prefixes: [\"_\"]").unwrap();

    let args = ConfigArgs {
        config: Some(path),
        output_sheet: None,
        skip_prefixes: vec!["tmp".to_string(), "x".to_string()],
    };
    let config = args.resolve().unwrap();
    assert_eq!(config.output_sheet, "Matriz");
    assert_eq!(config.skip_prefixes, vec!["tmp", "x"]);
}

#[test]
fn test_config_args_rejects_empty_prefix() {
    let args = ConfigArgs {
        skip_prefixes: vec![String::new()],
        ..Default::default()
    };
    assert!(args.resolve().is_err());
}

// =========================================================================
// Helper Tests
// =========================================================================

#[test]
fn test_completion_message() {
    assert_eq!(
        completion_message(3, Duration::from_millis(1260)),
        "Done. Columns: 3. Time: 1.3s"
    );
}

#[test]
fn test_default_output_path() {
    let path = default_output_path(Path::new("/data/costs.xlsx"), OutputFormat::Xlsx);
    assert_eq!(path, PathBuf::from("/data/costs_matrix.xlsx"));

    let path = default_output_path(Path::new("book.yaml"), OutputFormat::Json);
    assert_eq!(path, PathBuf::from("book_matrix.json"));
}

// =========================================================================
// Command Tests
// =========================================================================

#[test]
fn test_matrix_command_writes_csv() {
    let dir = TempDir::new().unwrap();
    let input = write_workbook(&dir);
    let output = dir.path().join("deps.csv");

    matrix(input, Some(output.clone()), None, ConfigArgs::default(), false).unwrap();

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(
        csv,
        ",Sales!ID,Sales!Total,Tax!Rate\n\
         Sales!ID,,,\n\
         Sales!Total,X,,\n\
         Tax!Rate,,,\n"
    );
}

#[test]
fn test_matrix_command_default_output() {
    let dir = TempDir::new().unwrap();
    let input = write_workbook(&dir);

    matrix(input, None, None, ConfigArgs::default(), true).unwrap();
    assert!(dir.path().join("book_matrix.xlsx").exists());
}

#[test]
fn test_matrix_command_refuses_to_overwrite_input() {
    let dir = TempDir::new().unwrap();
    let input = write_workbook(&dir);

    let result = matrix(
        input.clone(),
        Some(input.clone()),
        Some(OutputFormat::Json),
        ConfigArgs::default(),
        false,
    );
    assert!(matches!(result, Err(SheetDepsError::Validation(_))));
    assert_eq!(fs::read_to_string(&input).unwrap(), SALES_YAML);
}

#[cfg(unix)]
#[test]
fn test_matrix_command_refuses_input_spelled_differently() {
    let dir = TempDir::new().unwrap();
    let input = write_workbook(&dir);
    let absolute = input.canonicalize().unwrap();

    // Same file reached relative to the working directory
    let cwd = std::env::current_dir().unwrap().canonicalize().unwrap();
    let mut relative = PathBuf::new();
    for _ in cwd.components().skip(1) {
        relative.push("..");
    }
    relative.push(absolute.strip_prefix("/").unwrap());

    let result = matrix(
        relative,
        Some(absolute.clone()),
        Some(OutputFormat::Csv),
        ConfigArgs::default(),
        false,
    );
    assert!(matches!(result, Err(SheetDepsError::Validation(_))));

    let dotted = dir.path().join("nested").join("..").join("book.yaml");
    fs::create_dir(dir.path().join("nested")).unwrap();
    let result = matrix(
        input.clone(),
        Some(dotted),
        Some(OutputFormat::Csv),
        ConfigArgs::default(),
        false,
    );
    assert!(matches!(result, Err(SheetDepsError::Validation(_))));
    assert_eq!(fs::read_to_string(&input).unwrap(), SALES_YAML);
}

#[test]
fn test_same_file_detection() {
    let dir = TempDir::new().unwrap();
    let input = write_workbook(&dir);

    assert!(is_same_file(&input, &input.canonicalize().unwrap()));
    assert!(!is_same_file(&input, &dir.path().join("book.csv")));
    assert!(!is_same_file(&input, &dir.path().join("missing").join("book.yaml")));
}

#[test]
fn test_matrix_command_no_headers_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_workbook(&dir);
    let output = dir.path().join("deps.json");
    let args = ConfigArgs {
        skip_prefixes: vec!["S".to_string(), "T".to_string()],
        ..Default::default()
    };

    let result = matrix(input, Some(output.clone()), None, args, false);
    assert!(matches!(result, Err(SheetDepsError::NoHeaders)));
    assert!(!output.exists());
}

#[test]
fn test_columns_command() {
    let dir = TempDir::new().unwrap();
    let input = write_workbook(&dir);
    assert!(columns(input, ConfigArgs::default(), false).is_ok());
}

#[test]
fn test_deps_command() {
    let dir = TempDir::new().unwrap();
    let input = write_workbook(&dir);
    assert!(deps(input, "Sales!Total".to_string(), ConfigArgs::default()).is_ok());
}

#[test]
fn test_deps_command_unknown_column() {
    let dir = TempDir::new().unwrap();
    let input = write_workbook(&dir);
    let result = deps(input, "Sales!Missing".to_string(), ConfigArgs::default());
    assert!(matches!(result, Err(SheetDepsError::Validation(_))));
}
