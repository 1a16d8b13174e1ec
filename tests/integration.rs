use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn shelf_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_shelf"))
}

const CATALOG: &str = "\
kode_buku,nama_buku,penulis_buku,penerbit_buku
B3,Pemrograman Sistem,Bryant,Andi
B1,Sistem Operasi,Tanenbaum,Pearson
B2,Jaringan Komputer,Kurose,
B4,Basis Data,Date,Erlangga
";

fn setup_test_env(catalog: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("books.csv"), catalog).unwrap();

    let config_content = format!(
        r#"[catalog]
path = "{}/data/books.csv"

[browse]
default_sort = "code"

[search]
default_field = "title"
tolerance_ratio = 0.7
"#,
        root.display()
    );

    let config_path = config_dir.join("shelf.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_shelf(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = shelf_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run shelf binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn table_codes(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip_while(|l| !l.starts_with("CODE"))
        .skip(1)
        .filter_map(|l| l.split_whitespace().next().map(str::to_string))
        .collect()
}

#[test]
fn test_list_default_sort_by_code() {
    let (_tmp, config_path) = setup_test_env(CATALOG);

    let (stdout, stderr, success) = run_shelf(&config_path, &["list"]);
    assert!(success, "list failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Showing 4 books sorted by code."));
    assert_eq!(table_codes(&stdout), vec!["B1", "B2", "B3", "B4"]);
}

#[test]
fn test_list_sort_by_title() {
    let (_tmp, config_path) = setup_test_env(CATALOG);

    let (stdout, _, success) = run_shelf(&config_path, &["list", "--sort", "title"]);
    assert!(success);
    // basis < jaringan < pemrograman < sistem
    assert_eq!(table_codes(&stdout), vec!["B4", "B2", "B3", "B1"]);
}

#[test]
fn test_list_limit() {
    let (_tmp, config_path) = setup_test_env(CATALOG);

    let (stdout, _, success) = run_shelf(&config_path, &["list", "--sort", "author", "--limit", "2"]);
    assert!(success);
    assert!(stdout.contains("Showing 2 of 4 books sorted by author."));
    assert_eq!(table_codes(&stdout), vec!["B3", "B4"]);
}

#[test]
fn test_limit_zero_keeps_counts() {
    let (_tmp, config_path) = setup_test_env(CATALOG);

    let (stdout, _, success) = run_shelf(&config_path, &["list", "--limit", "0"]);
    assert!(success);
    assert!(stdout.contains("Showing 0 of 4 books sorted by code."));
    assert!(!stdout.contains("The catalog is empty."));
    assert!(table_codes(&stdout).is_empty());

    let (stdout, _, success) = run_shelf(&config_path, &["search", "sytem", "--limit", "0"]);
    assert!(success);
    assert!(stdout.contains("Found 2 matching books in title."));
    assert!(!stdout.contains("No matching books found."));
    assert!(table_codes(&stdout).is_empty());
}

#[test]
fn test_list_json_defaults_publisher() {
    let (_tmp, config_path) = setup_test_env(
        "kode_buku,nama_buku,penulis_buku\nB1,Sistem Operasi,Tanenbaum\n",
    );

    let (stdout, _, success) = run_shelf(&config_path, &["list", "--format", "json"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed[0]["code"], "B1");
    assert_eq!(parsed[0]["publisher"], "-");
}

#[test]
fn test_search_typo() {
    let (_tmp, config_path) = setup_test_env(CATALOG);

    let (stdout, stderr, success) = run_shelf(&config_path, &["search", "sytem"]);
    assert!(success, "search failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Found 2 matching books in title."));
    // both titles contain "sistem" (distance 2); tie broken by code
    assert_eq!(table_codes(&stdout), vec!["B1", "B3"]);
}

#[test]
fn test_search_json_scores() {
    let (_tmp, config_path) = setup_test_env(CATALOG);

    let (stdout, _, success) = run_shelf(
        &config_path,
        &["search", "jaringn", "komputr", "--format", "json"],
    );
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let results = parsed.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["code"], "B2");
    assert_eq!(results[0]["score"], 2.0);
}

#[test]
fn test_search_other_field() {
    let (_tmp, config_path) = setup_test_env(CATALOG);

    let (stdout, _, success) = run_shelf(&config_path, &["search", "kurose", "--field", "author"]);
    assert!(success);
    assert!(stdout.contains("Found 1 matching book in author."));
    assert_eq!(table_codes(&stdout), vec!["B2"]);
}

#[test]
fn test_search_no_results() {
    let (_tmp, config_path) = setup_test_env(CATALOG);

    let (stdout, _, success) = run_shelf(&config_path, &["search", "xyzqv"]);
    assert!(success);
    assert!(stdout.contains("No matching books found."));
}

#[test]
fn test_search_empty_keyword_prompts() {
    let (_tmp, config_path) = setup_test_env(CATALOG);

    let (stdout, _, success) = run_shelf(&config_path, &["search", "   "]);
    assert!(success);
    assert!(stdout.contains("Please enter a search keyword."));
}

#[test]
fn test_search_unknown_field_rejected() {
    let (_tmp, config_path) = setup_test_env(CATALOG);

    let (_, stderr, success) = run_shelf(&config_path, &["search", "x", "--field", "isbn"]);
    assert!(!success);
    assert!(stderr.contains("Unknown field"));
}

#[test]
fn test_missing_catalog_fails() {
    let (tmp, config_path) = setup_test_env(CATALOG);
    fs::remove_file(tmp.path().join("data/books.csv")).unwrap();

    let (_, stderr, success) = run_shelf(&config_path, &["list"]);
    assert!(!success);
    assert!(stderr.contains("Catalog file not found"));
}

#[test]
fn test_catalog_override() {
    let (tmp, config_path) = setup_test_env(CATALOG);
    let other = tmp.path().join("other.csv");
    fs::write(&other, "kode_buku,nama_buku,penulis_buku\nZ9,Kalkulus,Purcell\n").unwrap();

    let (stdout, _, success) = run_shelf(
        &config_path,
        &["--catalog", other.to_str().unwrap(), "list"],
    );
    assert!(success);
    assert_eq!(table_codes(&stdout), vec!["Z9"]);
}

#[test]
fn test_distance_command() {
    let (_tmp, config_path) = setup_test_env(CATALOG);

    let (stdout, _, success) = run_shelf(&config_path, &["distance", "kitten", "sitting"]);
    assert!(success);
    assert_eq!(stdout.trim(), "3");
}

#[test]
fn test_info_command() {
    let (_tmp, config_path) = setup_test_env(CATALOG);

    let (stdout, _, success) = run_shelf(&config_path, &["info"]);
    assert!(success);
    assert!(stdout.contains("Records:     4"));
    assert!(stdout.contains("books.csv"));
    assert!(stdout.contains("nama_buku"));
}

#[test]
fn test_shell_session() {
    let (_tmp, config_path) = setup_test_env(CATALOG);

    let mut child = Command::new(shelf_binary())
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .arg("shell")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"list title\nsearch author:tanenbaum\nbogus\nquit\nlist\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Showing 4 books sorted by title."));
    assert!(stdout.contains("Found 1 matching book in author."));
    assert!(stdout.contains("error: Unknown command: 'bogus'"));
    // nothing after quit
    assert_eq!(stdout.matches("Showing").count(), 1);
}

#[test]
fn test_missing_default_config_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("FP_buku.csv"),
        "kode_buku,nama_buku,penulis_buku\nB1,Sistem Operasi,Tanenbaum\n",
    )
    .unwrap();

    let output = Command::new(shelf_binary())
        .current_dir(tmp.path())
        .args(["search", "sistem"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Found 1 matching book"));
}
