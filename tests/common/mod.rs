//! Shared test infrastructure for integration tests.
//!
//! Builds a sandbox of fake stage executables that honor the real stage
//! argument contracts, so pipeline runs can be exercised end-to-end without
//! the actual engines installed. The fakes fail the same way the real
//! stages do when an engine installation is missing.
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const PREPROCESS_SH: &str = r#"#!/bin/sh
in=""; out=""; len=200
while [ $# -gt 0 ]; do
  case "$1" in
    -f) in="$2"; shift 2 ;;
    -o) out="$2"; shift 2 ;;
    --length) len="$2"; shift 2 ;;
    *) shift ;;
  esac
done
awk -v L="$len" '
  /^>/ { header = $0; next }
  {
    for (i = 1; i <= length($0); i += L) {
      n += 1
      print header "_frag" n
      print substr($0, i, L)
    }
  }
' "$in" > "$out"
"#;

const FIND_STEMS_SH: &str = r#"#!/bin/sh
in=""; outdir=""; engine=""
while [ $# -gt 0 ]; do
  case "$1" in
    -f) in="$2"; shift 2 ;;
    -o) outdir="$2"; shift 2 ;;
    --RNAstructure_path) engine="$2"; shift 2 ;;
    --temp_files_folder|--num_processes) shift 2 ;;
    *) shift ;;
  esac
done
if [ ! -d "$engine" ]; then
  echo "RNAstructure not found at $engine" >&2
  exit 1
fi
grep '^>' "$in" | sed 's/^>//; s/$/ stem_pair 12-24:80-92 vs 40-52:60-72/' > "$outdir/output.txt"
"#;

const FOLD_SH: &str = r#"#!/bin/sh
in=""; summary=""; out=""; engine=""
while [ $# -gt 0 ]; do
  case "$1" in
    -f) in="$2"; shift 2 ;;
    -s) summary="$2"; shift 2 ;;
    -o) out="$2"; shift 2 ;;
    --RNAstructure_path) engine="$2"; shift 2 ;;
    --temp_files_folder|--num_processes) shift 2 ;;
    *) shift ;;
  esac
done
if [ ! -d "$engine" ]; then
  echo "RNAstructure not found at $engine" >&2
  exit 1
fi
if [ ! -f "$summary" ]; then
  echo "stem summary missing: $summary" >&2
  exit 1
fi
grep '^>' "$in" | sed 's/$/ ((((....)))) ....((((....))))/' > "$out"
"#;

const BARRIERS_SH: &str = r#"#!/bin/sh
in=""; out=""; engine=""
while [ $# -gt 0 ]; do
  case "$1" in
    --dotbracket) in="$2"; shift 2 ;;
    -o) out="$2"; shift 2 ;;
    --path_rnapathfinder) engine="$2"; shift 2 ;;
    --temp_files_folder|--num_processes) shift 2 ;;
    *) shift ;;
  esac
done
if [ ! -d "$engine" ]; then
  echo "RNApathfinder not found at $engine" >&2
  exit 1
fi
awk '{ print $1, 12.5 }' "$in" > "$out"
"#;

const CLASSIFY_SH: &str = r#"#!/bin/sh
in=""; scores=""; full=""; short=""
while [ $# -gt 0 ]; do
  case "$1" in
    --energies_filename) in="$2"; shift 2 ;;
    --dataframe_output) scores="$2"; shift 2 ;;
    --text_output) full="$2"; shift 2 ;;
    --text_output_short) short="$2"; shift 2 ;;
    *) shift ;;
  esac
done
awk '{ print $1 "\t" 0.9 }' "$in" > "$scores"
cp "$scores" "$full"
head -n 1 "$scores" > "$short"
"#;

const FAKE_STAGES: [(&str, &str); 5] = [
    ("swf-preprocess", PREPROCESS_SH),
    ("swf-find-stems", FIND_STEMS_SH),
    ("swf-fold-structures", FOLD_SH),
    ("swf-energy-barriers", BARRIERS_SH),
    ("swf-classify", CLASSIFY_SH),
];

/// One scratch sandbox per test: fake stage programs, engine installs,
/// input data, and a workspace root.
pub struct PipelineFixture {
    pub sandbox: TempDir,
}

impl PipelineFixture {
    pub fn new() -> io::Result<Self> {
        let fixture = Self {
            sandbox: TempDir::new()?,
        };
        fs::create_dir_all(fixture.stage_bin_dir())?;
        for (name, script) in FAKE_STAGES {
            fixture.install_stage(name, script)?;
        }
        fs::create_dir_all(fixture.rnastructure_dir())?;
        fs::create_dir_all(fixture.rnapathfinder_dir())?;
        Ok(fixture)
    }

    pub fn stage_bin_dir(&self) -> PathBuf {
        self.sandbox.path().join("bin")
    }

    pub fn rnastructure_dir(&self) -> PathBuf {
        self.sandbox.path().join("RNAstructure")
    }

    pub fn rnapathfinder_dir(&self) -> PathBuf {
        self.sandbox.path().join("RNApathfinder")
    }

    pub fn workspace_dir(&self) -> PathBuf {
        self.sandbox.path().join("workspace")
    }

    pub fn interm_dir(&self) -> PathBuf {
        self.workspace_dir().join("interm")
    }

    pub fn chopped_path(&self) -> PathBuf {
        self.interm_dir().join("chopped_sequences.fa")
    }

    pub fn input_path(&self) -> PathBuf {
        self.sandbox.path().join("sequences.fa")
    }

    pub fn write_input(&self, contents: &str) -> io::Result<()> {
        fs::write(self.input_path(), contents)
    }

    fn install_stage(&self, name: &str, script: &str) -> io::Result<()> {
        let path = self.stage_bin_dir().join(name);
        fs::write(&path, script)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
    }

    /// Run `swfind` with the fake stage programs first on PATH and the given
    /// engine installation paths.
    pub fn run_with_engines(
        &self,
        rnastructure: &Path,
        rnapathfinder: &Path,
        extra_args: &[&str],
    ) -> io::Result<Output> {
        let path_var = match std::env::var("PATH") {
            Ok(existing) => format!("{}:{existing}", self.stage_bin_dir().display()),
            Err(_) => self.stage_bin_dir().display().to_string(),
        };
        Command::new(env!("CARGO_BIN_EXE_swfind"))
            .arg("--input")
            .arg(self.input_path())
            .arg("--workspace")
            .arg(self.workspace_dir())
            .arg("--rnastructure")
            .arg(rnastructure)
            .arg("--rnapathfinder")
            .arg(rnapathfinder)
            .args(extra_args)
            .env("PATH", path_var)
            .output()
    }

    /// Run `swfind` with both engine installs present.
    pub fn run(&self, extra_args: &[&str]) -> io::Result<Output> {
        self.run_with_engines(
            &self.rnastructure_dir(),
            &self.rnapathfinder_dir(),
            extra_args,
        )
    }
}

/// Two 300-base sequences, so a 200-base window yields two fragments each.
pub fn two_sequence_fasta() -> String {
    let seq = "ACGTACGTAC".repeat(30);
    format!(">switch_candidate_1\n{seq}\n>switch_candidate_2\n{seq}\n")
}
