//! Configuration integration tests.
//!
//! Each test writes a configuration into a scratch project, runs the binary
//! from there and checks that the setting reaches the analysis: language
//! gating of the readability formulas, the reference corpus and its latent
//! dimensions, tagger and frequency tables, and the input limit.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const TEXT: &str = "Der Hund bellt laut. Der Hund jagt die Katze.\nDie Katze flieht in den Garten.\n";

const CORPUS: &[&str] = &[
    "Der Hund bellt laut. Die Katze miaut leise.",
    "Die Sonne scheint hell am Himmel.\nDer Mond leuchtet nachts.",
    "Die Aktien fallen. Die Börse schließt früh.",
];

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// A project directory holding `text.txt` and a `corpus/` directory.
fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("text.txt"), TEXT).unwrap();
    let corpus = tmp.path().join("corpus");
    fs::create_dir(&corpus).unwrap();
    for (i, text) in CORPUS.iter().enumerate() {
        fs::write(corpus.join(format!("doc{i}.txt")), text).unwrap();
    }
    tmp
}

/// Run the binary in `dir` with `--json` and parse stdout.
fn json_in(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> Value {
    let output = cmd()
        .envs(env.iter().copied())
        .arg("-C")
        .arg(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

fn row<'a>(report: &'a Value, code: &str) -> &'a Value {
    report["metrics"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["code"] == code)
        .unwrap_or_else(|| panic!("no row for {code}"))
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn defaults_without_configuration() {
    let tmp = project();
    let info = json_in(tmp.path(), &["info"], &[]);

    assert!(info["config_file"].is_null());
    let settings = &info["settings"];
    assert_eq!(settings["language"], "german");
    assert_eq!(settings["tag_level"], 2);
    assert_eq!(settings["cache"], true);
    assert_eq!(settings["n_components"], 4);
    assert_eq!(settings["max_input_bytes"], 5 * 1024 * 1024);
    assert_eq!(info["providers"]["tokenizer"], "rule-based");
    assert!(info["providers"]["lexicon"].is_null());
    assert!(info["corpus"].is_null());
}

#[test]
fn metric_catalogue_is_reported_per_category() {
    let tmp = project();
    let info = json_in(tmp.path(), &["info"], &[]);
    let metrics = info["metrics"].as_array().unwrap();

    let total: u64 = metrics.iter().map(|c| c["metrics"].as_u64().unwrap()).sum();
    assert_eq!(total, 45);
    let lsa = metrics.iter().find(|c| c["category"] == "lsa").unwrap();
    assert_eq!(lsa["metrics"], 5);
}

// =============================================================================
// Language
// =============================================================================

#[test]
fn english_from_configuration_keeps_only_flesch() {
    let tmp = project();
    fs::write(tmp.path().join(".kohaesion.toml"), "language = \"en\"\n").unwrap();

    let report = json_in(
        tmp.path(),
        &["analyze", "text.txt", "--category", "readability"],
        &[],
    );
    assert_eq!(report["metrics"].as_array().unwrap().len(), 3);
    assert_eq!(row(&report, "RDLIX")["error"]["kind"], "unsupported_language");
    assert_eq!(row(&report, "RDWSTF")["error"]["kind"], "unsupported_language");
    assert!(row(&report, "RDFRE")["value"].is_number());
}

#[test]
fn language_flag_overrides_configuration() {
    let tmp = project();
    fs::write(tmp.path().join(".kohaesion.toml"), "language = \"en\"\n").unwrap();

    let report = json_in(
        tmp.path(),
        &["--language", "de", "analyze", "text.txt", "--checks", "RDLIX"],
        &[],
    );
    assert!(row(&report, "RDLIX")["value"].is_number());
}

#[test]
fn unknown_language_from_environment_only_fails_readability() {
    let tmp = project();
    let env = [("KOHAESION_LANGUAGE", "latin")];

    let info = json_in(tmp.path(), &["info"], &env);
    assert_eq!(info["settings"]["language"], "latin");

    let report = json_in(tmp.path(), &["analyze", "text.txt"], &env);
    for code in ["RDLIX", "RDWSTF", "RDFRE"] {
        assert_eq!(row(&report, code)["error"]["kind"], "unsupported_language");
    }
    assert_eq!(row(&report, "DESSC")["value"], 3);
    assert!(row(&report, "CRFCWO1")["value"].is_object());
}

// =============================================================================
// Corpus and latent dimensions
// =============================================================================

#[test]
fn corpus_and_components_from_configuration() {
    let tmp = project();
    fs::write(
        tmp.path().join("kohaesion.yaml"),
        "corpus_dir: corpus\nn_components: 2\n",
    )
    .unwrap();

    let info = json_in(tmp.path(), &["info"], &[]);
    assert_eq!(info["corpus"]["dir"], "corpus");
    assert_eq!(info["corpus"]["files"], 3);

    let space = json_in(tmp.path(), &["space"], &[]);
    assert_eq!(space["documents"], 3);
    assert_eq!(space["paragraphs"], 4);
    assert_eq!(space["n_components"], 2);

    let report = json_in(tmp.path(), &["analyze", "text.txt", "--checks", "lsa"], &[]);
    assert!(row(&report, "LSASS1")["value"]["mean"].is_number());
}

#[test]
fn unreadable_corpus_is_reported() {
    let tmp = project();
    fs::write(tmp.path().join(".kohaesion.toml"), "corpus_dir = \"missing\"\n").unwrap();

    let info = json_in(tmp.path(), &["info"], &[]);
    assert_eq!(info["corpus"]["dir"], "missing");
    assert!(info["corpus"]["files"].is_null());

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "space"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load corpus from missing"));
}

#[test]
fn components_from_environment_override_configuration() {
    let tmp = project();
    fs::write(
        tmp.path().join(".kohaesion.toml"),
        "corpus_dir = \"corpus\"\nn_components = 3\n",
    )
    .unwrap();
    let env = [("KOHAESION_N_COMPONENTS", "2")];

    assert_eq!(json_in(tmp.path(), &["info"], &env)["settings"]["n_components"], 2);
    assert_eq!(json_in(tmp.path(), &["space"], &env)["n_components"], 2);
}

#[test]
fn components_flag_overrides_environment() {
    let tmp = project();
    fs::write(tmp.path().join(".kohaesion.toml"), "corpus_dir = \"corpus\"\n").unwrap();
    let env = [("KOHAESION_N_COMPONENTS", "3")];

    let space = json_in(tmp.path(), &["space", "--components", "1"], &env);
    assert_eq!(space["n_components"], 1);
    assert_eq!(space["dimensions"].as_array().unwrap().len(), 1);
}

#[test]
fn zero_components_are_rejected() {
    let tmp = project();
    fs::write(
        tmp.path().join(".kohaesion.toml"),
        "corpus_dir = \"corpus\"\nn_components = 0\n",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "space"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("n_components must be between 1"));
}

// =============================================================================
// Tagger lexicon and frequency table
// =============================================================================

#[test]
fn lexicon_and_frequencies_are_loaded() {
    let tmp = project();
    fs::write(
        tmp.path().join("lexicon.txt"),
        "# surface lemma tag\nbellt bellen VVFIN\nflieht fliehen VVFIN\n",
    )
    .unwrap();
    fs::write(tmp.path().join("freq.tsv"), "Hund\t99\nKatze\t42\nGarten\t17\n").unwrap();
    fs::write(
        tmp.path().join(".kohaesion.toml"),
        "lexicon = \"lexicon.txt\"\nfrequencies = \"freq.tsv\"\n",
    )
    .unwrap();

    let info = json_in(tmp.path(), &["info"], &[]);
    assert_eq!(info["providers"]["lexicon"]["entries"], 2);
    assert_eq!(info["providers"]["frequencies"]["entries"], 3);

    let report = json_in(tmp.path(), &["analyze", "text.txt", "--checks", "WRDFRQc"], &[]);
    assert!(row(&report, "WRDFRQc")["value"].is_number());
}

#[test]
fn missing_lexicon_stops_analysis() {
    let tmp = project();
    fs::write(tmp.path().join(".kohaesion.toml"), "lexicon = \"absent.txt\"\n").unwrap();
    let dir = tmp.path().to_str().unwrap();

    cmd()
        .args(["-C", dir, "analyze", "text.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to set up the language pipeline"));
    cmd()
        .args(["-C", dir, "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read lexicon absent.txt"));
}

// =============================================================================
// Tag level, input limit and precedence
// =============================================================================

#[test]
fn tag_level_flag_overrides_configuration() {
    let tmp = project();
    fs::write(tmp.path().join(".kohaesion.toml"), "tag_level = 3\n").unwrap();

    assert_eq!(json_in(tmp.path(), &["info"], &[])["settings"]["tag_level"], 3);
    let info = json_in(tmp.path(), &["--tag-level", "1", "info"], &[]);
    assert_eq!(info["settings"]["tag_level"], 1);
}

#[test]
fn invalid_tag_level_is_a_configuration_error() {
    let tmp = project();
    fs::write(tmp.path().join(".kohaesion.toml"), "tag_level = 9\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "analyze", "text.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn disabled_input_limit_ignores_max_input_bytes() {
    let tmp = project();
    fs::write(
        tmp.path().join(".kohaesion.toml"),
        "max_input_bytes = 10\ndisable_input_limit = true\n",
    )
    .unwrap();

    let info = json_in(tmp.path(), &["info"], &[]);
    assert!(info["settings"]["max_input_bytes"].is_null());
    let report = json_in(tmp.path(), &["analyze", "text.txt", "--checks", "DESSC"], &[]);
    assert_eq!(row(&report, "DESSC")["value"], 3);
}

#[test]
fn explicit_config_file_wins_over_project_file() {
    let tmp = project();
    fs::write(tmp.path().join(".kohaesion.toml"), "language = \"en\"\n").unwrap();
    let explicit = tmp.path().join("german.yaml");
    fs::write(&explicit, "language: deutsch\nn_components: 2\n").unwrap();

    let info = json_in(
        tmp.path(),
        &["--config", explicit.to_str().unwrap(), "info"],
        &[],
    );
    assert_eq!(info["settings"]["language"], "german");
    assert_eq!(info["settings"]["n_components"], 2);
    assert!(
        info["config_file"]
            .as_str()
            .unwrap()
            .ends_with("german.yaml")
    );
}

#[test]
fn malformed_configuration_fails() {
    let tmp = project();
    fs::write(tmp.path().join(".kohaesion.toml"), "language = [\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

// =============================================================================
// Logging
// =============================================================================

#[test]
fn log_dir_from_configuration_writes_jsonl() {
    let tmp = project();
    fs::write(tmp.path().join(".kohaesion.toml"), "log_dir = \"logs\"\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "readability", "text.txt"])
        .assert()
        .success();

    assert!(tmp.path().join("logs").join("kohaesion.jsonl").is_file());
}
