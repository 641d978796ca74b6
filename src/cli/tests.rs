use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_copy() {
    let cli = parse(&["procbar", "copy", "a.iso", "b.iso"]);
    match cli.command {
        CliCommand::Copy { src, dst } => {
            assert_eq!(src, PathBuf::from("a.iso"));
            assert_eq!(dst, PathBuf::from("b.iso"));
        }
        _ => panic!("expected Copy"),
    }
    assert!(!cli.bar.keep);
    assert!(cli.bar.prefix.is_none());
}

#[test]
fn cli_parse_simulate_defaults() {
    match parse(&["procbar", "simulate", "--total", "500"]).command {
        CliCommand::Simulate {
            total,
            chunk,
            delay_ms,
        } => {
            assert_eq!(total, 500);
            assert_eq!(chunk, 4096);
            assert_eq!(delay_ms, 10);
        }
        _ => panic!("expected Simulate"),
    }
}

#[test]
fn cli_parse_global_flags_after_subcommand() {
    let cli = parse(&[
        "procbar",
        "simulate",
        "--total",
        "10",
        "--prefix",
        "Demo",
        "--keep",
        "--fixed-width",
        "-q",
    ]);
    assert_eq!(cli.bar.prefix.as_deref(), Some("Demo"));
    assert!(cli.bar.keep);
    assert!(cli.bar.fixed_width);
    assert!(cli.bar.quiet);
}

#[test]
fn cli_parse_simulate_requires_total() {
    assert!(Cli::try_parse_from(["procbar", "simulate"]).is_err());
}

#[test]
fn flags_override_config() {
    let cfg = ProcbarConfig {
        prefix: "FromFile".into(),
        clean_after_finish: true,
        ..ProcbarConfig::default()
    };
    let bar = BarArgs {
        prefix: Some("FromFlag".into()),
        keep: true,
        url: Some("https://x/y/report.csv".into()),
        show_file_name: true,
        ..BarArgs::default()
    };
    let t = procbar::ProgressTracker::with_options(10, bar.options(&cfg));
    assert_eq!(t.config().prefix, "report.csv");
    assert!(!t.config().clean_on_finish);

    let plain = BarArgs {
        prefix: Some("FromFlag".into()),
        ..BarArgs::default()
    };
    let t = procbar::ProgressTracker::with_options(10, plain.options(&cfg));
    assert_eq!(t.config().prefix, "FromFlag");
}
