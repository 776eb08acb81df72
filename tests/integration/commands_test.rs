use pstree::cli::USAGE;
use pstree::commands;
use pstree::core::{ProcessSource, ProcfsSource, SourceConfig};
use pstree::{ProcessInfo, PstreeError};
use std::fs;
use std::io;
use tempfile::TempDir;

struct FakeSource(Vec<ProcessInfo>);

impl ProcessSource for FakeSource {
    fn collect(&self) -> pstree::Result<Vec<ProcessInfo>> {
        Ok(self.0.clone())
    }
}

struct UnavailableSource;

impl ProcessSource for UnavailableSource {
    fn collect(&self) -> pstree::Result<Vec<ProcessInfo>> {
        Err(PstreeError::source_unavailable(
            "/proc",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        ))
    }
}

struct Output {
    code: u8,
    stdout: String,
    stderr: String,
}

fn run_with<S: ProcessSource>(args: &[&str], source: &S) -> Output {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let argv = std::iter::once("pstree").chain(args.iter().copied());
    let code = commands::run(argv, source, &mut out, &mut err);
    Output {
        code,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

fn chain_source() -> FakeSource {
    FakeSource(vec![
        ProcessInfo::new(1, "init", Some(0)),
        ProcessInfo::new(2, "shell", Some(1)),
        ProcessInfo::new(3, "editor", Some(2)),
    ])
}

#[test]
fn test_default_output_is_nested_chain() {
    let output = run_with(&[], &chain_source());
    assert_eq!(output.code, 0);
    assert_eq!(output.stdout, "init\n└─shell\n  └─editor\n");
    assert!(output.stderr.is_empty());
}

#[test]
fn test_show_pids_output() {
    let output = run_with(&["--show-pids"], &chain_source());
    assert_eq!(output.code, 0);
    assert_eq!(output.stdout, "init (1)\n└─shell (2)\n  └─editor (3)\n");
}

#[test]
fn test_numeric_sort_output() {
    let source = FakeSource(vec![
        ProcessInfo::new(1, "init", Some(0)),
        ProcessInfo::new(30, "c", Some(1)),
        ProcessInfo::new(10, "a", Some(1)),
        ProcessInfo::new(20, "b", Some(1)),
    ]);

    let discovery = run_with(&["-p"], &source);
    assert_eq!(
        discovery.stdout,
        "init (1)\n├─c (30)\n├─a (10)\n└─b (20)\n"
    );

    let numeric = run_with(&["-p", "-n"], &source);
    assert_eq!(numeric.stdout, "init (1)\n├─a (10)\n├─b (20)\n└─c (30)\n");
}

#[test]
fn test_empty_snapshot_prints_nothing() {
    let output = run_with(&[], &FakeSource(Vec::new()));
    assert_eq!(output.code, 0);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_version_skips_collection() {
    let output = run_with(&["--version"], &UnavailableSource);
    assert_eq!(output.code, 0);
    assert!(output.stdout.is_empty());
    assert!(output.stderr.starts_with("pstree "));
    assert!(output.stderr.contains("Copyleft (C) 0000-0000"));
}

#[test]
fn test_invalid_option_prints_usage() {
    let output = run_with(&["--bogus"], &chain_source());
    assert_eq!(output.code, 2);
    assert!(output.stdout.is_empty());
    assert_eq!(
        output.stderr,
        format!("pstree: invalid option --bogus\n{}\n", USAGE)
    );
}

#[test]
fn test_clustered_flags_echo_whole_token() {
    let output = run_with(&["-pn"], &chain_source());
    assert_eq!(output.code, 2);
    assert!(output.stdout.is_empty());
    assert_eq!(output.stderr, format!("pstree: invalid option -pn\n{}\n", USAGE));
}

#[test]
fn test_help_prints_usage() {
    let output = run_with(&["-h"], &chain_source());
    assert_eq!(output.code, 0);
    assert_eq!(output.stderr, format!("{}\n", USAGE));
}

#[test]
fn test_unavailable_source_fails() {
    let output = run_with(&["-p"], &UnavailableSource);
    assert_eq!(output.code, 1);
    assert!(output.stdout.is_empty());
    assert_eq!(output.stderr, "pstree: Cannot open /proc: permission denied\n");
}

#[test]
fn test_runs_against_fake_procfs() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    for (pid, name, ppid) in [("1", "init", "0"), ("2", "sshd", "1"), ("3", "bash", "2")] {
        fs::create_dir_all(root.join(pid)).unwrap();
        fs::write(
            root.join(pid).join("status"),
            format!("Name:\t{}\nUmask:\t0022\nPPid:\t{}\n", name, ppid),
        )
        .unwrap();
    }

    let source = ProcfsSource::with_config(SourceConfig {
        procfs_root: root.to_path_buf(),
        ..SourceConfig::default()
    });
    let output = run_with(&["--numeric-sort", "--show-pids"], &source);
    assert_eq!(output.code, 0);
    assert_eq!(output.stdout, "init (1)\n└─sshd (2)\n  └─bash (3)\n");
}

#[test]
fn test_deep_fake_source_streams_output() {
    let depth = 2_000;
    let source = FakeSource(
        (1..=depth)
            .map(|pid| ProcessInfo::new(pid, "link", Some(pid - 1)))
            .collect(),
    );

    let output = run_with(&[], &source);
    assert_eq!(output.code, 0);
    assert_eq!(output.stdout.lines().count(), depth as usize);
    let last = output.stdout.lines().last().unwrap();
    assert_eq!(last, format!("{}└─link", "  ".repeat(depth as usize - 2)));
}
