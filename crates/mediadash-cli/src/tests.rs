use std::io::Write as _;

use mediadash_pipeline::AggregateOptions;

use super::*;

const CSV: &str = "\
Date,Platform,Sentiment,Location,Engagements,Media Type
2024-01-01,Instagram,Positive,Jakarta,100,Video
2024-01-02,TikTok,Negative,Bandung,300,Image
2024-01-03,Instagram,Neutral,Jakarta,50,Image
bad,TikTok,Negative,Bandung,999,Image
";

fn outcome(selection: FilterSelection) -> mediadash_pipeline::PipelineOutcome {
    let table = RawTable::from_csv_reader(CSV.as_bytes()).unwrap();
    mediadash_pipeline::run_pipeline(table, selection, &AggregateOptions::default()).unwrap()
}

#[test]
fn parses_report_command_without_filters() {
    let cli = Cli::try_parse_from(["mediadash", "report", "posts.csv"])
        .expect("expected valid cli args");
    let Commands::Report { input, filters } = cli.command else {
        panic!("expected report command");
    };
    assert_eq!(input, PathBuf::from("posts.csv"));
    assert!(matches!(filters.selection().unwrap(), FilterSelection::Covering));
}

#[test]
fn parses_repeatable_filters() {
    let cli = Cli::try_parse_from([
        "mediadash",
        "report",
        "posts.csv",
        "--start",
        "2024-01-01",
        "--end",
        "2024-01-31",
        "--platform",
        "TikTok",
        "--platform",
        "Instagram",
        "--sentiment",
        "Positive",
        "--media-type",
        "Video",
    ])
    .unwrap();
    let Commands::Report { filters, .. } = cli.command else {
        panic!("expected report command");
    };
    let FilterSelection::Preset(preset) = filters.selection().unwrap() else {
        panic!("expected preset selection");
    };
    assert_eq!(preset.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
    assert_eq!(preset.end_date, NaiveDate::from_ymd_opt(2024, 1, 31));
    assert_eq!(
        preset.platforms,
        Some(vec!["TikTok".to_string(), "Instagram".to_string()])
    );
    assert_eq!(preset.sentiments, Some(vec![Sentiment::Positive]));
    assert_eq!(preset.media_types, Some(vec!["Video".to_string()]));
}

#[test]
fn rejects_unknown_sentiment_and_bad_date() {
    assert!(Cli::try_parse_from(["mediadash", "report", "x.csv", "--sentiment", "happy"]).is_err());
    assert!(Cli::try_parse_from(["mediadash", "report", "x.csv", "--start", "01/02/2024"]).is_err());
}

#[test]
fn parses_export_with_default_out_dir() {
    let cli = Cli::try_parse_from(["mediadash", "export", "posts.csv"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Export { ref out_dir, .. } if out_dir == Path::new(".")
    ));
}

#[test]
fn parses_demo_options() {
    let cli =
        Cli::try_parse_from(["mediadash", "demo", "--rows", "30", "--seed", "9"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Demo {
            rows: Some(30),
            seed: Some(9),
            out: None
        }
    ));
}

#[test]
fn parses_insight_categories() {
    let cli = Cli::try_parse_from([
        "mediadash",
        "insights",
        "posts.csv",
        "--category",
        "trend",
        "--category",
        "geographic",
    ])
    .unwrap();
    let Commands::Insights { categories, .. } = cli.command else {
        panic!("expected insights command");
    };
    assert_eq!(
        categories,
        vec![AnalysisCategory::EngagementTrend, AnalysisCategory::Geographic]
    );
    assert!(Cli::try_parse_from(["mediadash", "insights", "p.csv", "--category", "weather"]).is_err());
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["mediadash"]).is_err());
}

#[test]
fn flags_override_preset_file() {
    let mut preset = tempfile::NamedTempFile::new().unwrap();
    writeln!(preset, "platforms: [TikTok]\nsentiments: [negative]").unwrap();

    let args = FilterArgs {
        platforms: vec!["Instagram".to_string()],
        preset: Some(preset.path().to_path_buf()),
        ..FilterArgs::default()
    };
    let FilterSelection::Preset(resolved) = args.selection().unwrap() else {
        panic!("expected preset selection");
    };
    assert_eq!(resolved.platforms, Some(vec!["Instagram".to_string()]));
    assert_eq!(resolved.sentiments, Some(vec![Sentiment::Negative]));
}

#[test]
fn missing_preset_file_is_an_error() {
    let args = FilterArgs {
        preset: Some(PathBuf::from("/nonexistent/preset.yaml")),
        ..FilterArgs::default()
    };
    let err = args.selection().unwrap_err();
    assert!(err.to_string().contains("failed to load filter preset"));
}

#[test]
fn markdown_report_has_kpis_and_quality() {
    let text = report::render_markdown(&outcome(FilterSelection::Covering), "posts.csv", 15.0);
    assert!(text.starts_with("# Engagement Report"));
    assert!(text.contains("| Total Posts | 3 |"));
    assert!(text.contains("| Total Engagement | 450 |"));
    assert!(text.contains("| Positive Sentiment | 33.3% |"));
    assert!(text.contains("| Dropped (unparseable date) | 1 |"));
    assert!(text.contains("- **Top platform**: TikTok with 300 engagements"));
    assert!(text.contains("- **Attention**: negative sentiment at 33.3% exceeds 15%"));
    assert!(text.contains("| January 2024 | 450 |"));
}

#[test]
fn markdown_report_for_empty_result_says_no_data() {
    let preset = FilterPreset {
        platforms: Some(vec!["Facebook".to_string()]),
        ..FilterPreset::default()
    };
    let text = report::render_markdown(&outcome(FilterSelection::Preset(preset)), "posts.csv", 15.0);
    assert!(text.contains("No data matches the current filters"));
    assert!(!text.contains("Key Metrics"));
}

#[test]
fn exports_write_three_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    let written = export::write_exports(&outcome(FilterSelection::Covering), dir.path()).unwrap();
    assert_eq!(written.len(), 3);

    let filtered = std::fs::read_to_string(dir.path().join(export::FILTERED_FILE)).unwrap();
    assert_eq!(
        filtered,
        "date,platform,sentiment,location,engagements,media_type\n\
         2024-01-01,Instagram,Positive,Jakarta,100,Video\n\
         2024-01-02,TikTok,Negative,Bandung,300,Image\n\
         2024-01-03,Instagram,Neutral,Jakarta,50,Image\n"
    );

    let summary = std::fs::read_to_string(dir.path().join(export::SUMMARY_FILE)).unwrap();
    assert_eq!(
        summary,
        "Metric,Value\nTotal Posts,3\nTotal Engagement,450\nAvg Engagement,150\n\
         Positive Sentiment %,33.3%\n"
    );

    let platforms = std::fs::read_to_string(dir.path().join(export::PLATFORM_FILE)).unwrap();
    assert_eq!(platforms, "platform,engagements\nTikTok,300\nInstagram,150\n");
}

#[test]
fn exports_skip_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let preset = FilterPreset {
        sentiments: Some(vec![Sentiment::Positive]),
        media_types: Some(vec!["Text".to_string()]),
        ..FilterPreset::default()
    };
    let written =
        export::write_exports(&outcome(FilterSelection::Preset(preset)), dir.path()).unwrap();
    assert!(written.is_empty());
    assert!(!dir.path().join(export::SUMMARY_FILE).exists());
}
