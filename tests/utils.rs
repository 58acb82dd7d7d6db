use scaffold::cli::Args;
use scaffold::config::{DatabaseKind, DeploymentKind};
use scaffold::constants::TEMP_FILE_PREFIX;
use scaffold::context::GenerationContext;
use scaffold::validation::{parse_features, ModulePath};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const FIXTURE_TEMPLATES: &str = "tests/templates/go_service";
pub const FIXTURE_EXPECTED: &str = "tests/expected/go_service";

/// Prints a diff of files and their contents between two directories.
///
/// # Arguments
/// * `dir1` - The first directory to compare (actual output).
/// * `dir2` - The second directory to compare (expected output).
pub fn print_dir_diff(dir1: &Path, dir2: &Path) {
    let files1 = relative_files(dir1);
    let files2 = relative_files(dir2);

    println!("\n=== Directory Comparison ===");
    println!("Actual output:   {:?}", dir1);
    println!("Expected output: {:?}", dir2);

    for file in files1.iter().filter(|f| !files2.contains(f)) {
        println!("  + {:?}", file);
    }
    for file in files2.iter().filter(|f| !files1.contains(f)) {
        println!("  - {:?}", file);
    }
    for file in files1.iter().filter(|f| files2.contains(f)) {
        let actual = fs::read(dir1.join(file)).unwrap();
        let expected = fs::read(dir2.join(file)).unwrap();
        if actual != expected {
            println!("\n  File: {:?}", file);
            println!("  --- Actual content:\n{}", String::from_utf8_lossy(&actual));
            println!("  --- Expected content:\n{}", String::from_utf8_lossy(&expected));
        }
    }
    println!("=== End of Comparison ===\n");
}

/// Asserts that two directory trees are identical, printing a diff first if not.
pub fn assert_same_tree(actual: &Path, expected: &Path) {
    if dir_diff::is_different(actual, expected).unwrap() {
        print_dir_diff(actual, expected);
        panic!("Directories differ. See above for details.");
    }
}

/// Files below `dir`, relative to it, sorted.
pub fn relative_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(dir).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

/// Leftover in-flight files anywhere below `dir`.
pub fn temp_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with(TEMP_FILE_PREFIX))
        .map(|e| e.path().to_path_buf())
        .collect()
}

pub fn context(features: &str) -> GenerationContext {
    GenerationContext::new(
        "demo",
        ModulePath::parse("example.com/demo").unwrap(),
        parse_features(features).unwrap(),
        serde_json::json!({"environment": "development"}),
        Vec::new(),
    )
}

/// CLI arguments for a run that never spawns the module initialiser.
pub fn args(output: &Path) -> Args {
    Args {
        name: "demo".to_string(),
        module: "example.com/demo".to_string(),
        features: String::new(),
        db: DatabaseKind::Postgres,
        deployment: DeploymentKind::Docker,
        output: Some(output.to_path_buf()),
        config: None,
        templates: None,
        skip_mod_init: true,
        dry_run: false,
        manifest: false,
        verbose: 2,
    }
}
