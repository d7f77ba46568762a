use std::fs;
use std::path::Path;

use modal_mass::config::RunConfig;
use modal_mass::data::loader::format_row;
use modal_mass::report::table::{read_table, table_maxima};
use modal_mass::{run, Axis, ParseError, RowFault, RunOutcome};

/// Build a report in the solver's layout; each table lists (frequency, ratio).
fn report_text(mode_count: usize, tables: [&[(f64, f64)]; 3]) -> String {
    let mut lines = vec![
        " *** PRECISE MASS SUMMARY ***".to_string(),
        String::new(),
        format!("   NUMBER OF MODES ={mode_count:>4}"),
        format!("   TOTAL MASS ={:>12.5}", 10.0),
    ];
    for (axis, rows) in Axis::ALL.into_iter().zip(tables) {
        lines.push(String::new());
        lines.push(format!(
            " ***** PARTICIPATION FACTOR CALCULATION *****  {}",
            axis.marker()
        ));
        lines.push("                                         CUMULATIVE     RATIO EFF.MASS".into());
        lines.push("  MODE   FREQUENCY   PERIOD   EFFECTIVE MASS   MASS FRACTION   TO TOTAL MASS".into());
        let mut fraction = 0.0;
        for (i, &(frequency, ratio)) in rows.iter().enumerate() {
            fraction += ratio;
            lines.push(format_row(&[
                (i + 1) as f64,
                frequency,
                1.0 / frequency,
                ratio.sqrt(),
                1.0,
                ratio * 10.0,
                fraction,
                ratio,
            ]));
        }
        lines.push(format!(" sum{:>79.6e}", fraction * 10.0));
    }
    lines.join("\n") + "\n"
}

fn config_in(dir: &Path) -> RunConfig {
    RunConfig {
        input_dir: dir.join("input"),
        output_dir: dir.join("output"),
        // Keep the chart small so the tests stay quick.
        figure_size: (4.0, 3.0),
        dpi: 100.0,
        ..RunConfig::default()
    }
}

fn write_input(config: &RunConfig, text: &str) {
    fs::create_dir_all(&config.input_dir).unwrap();
    fs::write(config.input_path(), text).unwrap();
}

fn output_files(config: &RunConfig) -> Vec<String> {
    match fs::read_dir(&config.output_dir) {
        Ok(entries) => entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn missing_input_is_reported_without_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let outcome = run(&config).unwrap();

    assert_eq!(outcome, RunOutcome::MissingInput(config.input_path()));
    assert!(output_files(&config).is_empty());
}

#[test]
fn two_mode_report_produces_step_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_input(
        &config,
        &report_text(
            2,
            [
                &[(5.0, 0.3), (8.0, 0.2)],
                &[(5.0, 0.05), (8.0, 0.6)],
                &[(5.0, 0.0), (8.0, 0.01)],
            ],
        ),
    );

    let RunOutcome::Completed(summary) = run(&config).unwrap() else {
        panic!("expected a completed run");
    };
    assert_eq!(summary.mode_count, 2);
    assert!((summary.total_mass - 10.0).abs() < 1e-12);
    assert_eq!(summary.table_path, config.table_path());
    if let Some(chart) = &summary.chart_path {
        assert_eq!(chart, &config.chart_path());
        assert!(chart.exists());
    }

    let text = fs::read_to_string(&summary.table_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "#  Freq[Hz] Acc.rMassX[%] Acc.rMassY[%] Acc.rMassZ[%]",
            "5.000 0.000 0.000 0.000",
            "5.000 30.000 5.000 0.000",
            "8.000 30.000 5.000 0.000",
            "8.000 50.000 65.000 1.000",
        ]
    );
}

#[test]
fn table_round_trip_reproduces_maxima() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let x: &[(f64, f64)] = &[(3.49, 0.0103), (3.86, 0.5171), (5.45, 0.00005), (5.81, 0.0004)];
    let y: &[(f64, f64)] = &[(3.49, 0.6011), (3.86, 0.0002), (5.45, 0.1234), (5.81, 0.0)];
    let z: &[(f64, f64)] = &[(3.49, 0.0), (3.86, 0.0), (5.45, 0.7001), (5.81, 0.0815)];
    write_input(&config, &report_text(4, [x, y, z]));

    let RunOutcome::Completed(summary) = run(&config).unwrap() else {
        panic!("expected a completed run");
    };
    let rows = read_table(&summary.table_path).unwrap();
    assert_eq!(rows.len(), 8);

    let maxima = table_maxima(&rows).unwrap();
    for (expected, found) in summary.maxima.into_iter().zip(maxima) {
        assert!(
            (expected - found).abs() <= 0.0005 + 1e-9,
            "{expected} vs {found}"
        );
    }
    for pair in rows.windows(2) {
        assert!(pair[1].x_percent >= pair[0].x_percent);
        assert!(pair[1].y_percent >= pair[0].y_percent);
        assert!(pair[1].z_percent >= pair[0].z_percent);
    }
}

#[test]
fn short_tables_fail_for_every_axis_and_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let full: &[(f64, f64)] = &[(5.0, 0.3), (8.0, 0.2), (9.5, 0.1)];
    let short: &[(f64, f64)] = &[(5.0, 0.3), (8.0, 0.2)];
    write_input(&config, &report_text(3, [full, short, short]));

    let err = run(&config).unwrap_err();
    let Some(ParseError::AxisTablesFailed(failures)) = err.downcast_ref::<ParseError>() else {
        panic!("expected aggregated table failures, got {err:#}");
    };
    assert_eq!(failures.len(), 2);
    for (failure, axis) in failures.iter().zip([Axis::Y, Axis::Z]) {
        assert!(matches!(
            failure,
            ParseError::ModeCountMismatch {
                axis: a,
                requested: 3,
                extracted: 2,
                fault: RowFault::InvalidField { row: 3, .. },
            } if *a == axis
        ));
    }
    assert!(format!("{err:#}").contains("number of modes requested (3)"));
    assert!(output_files(&config).is_empty());
}

#[test]
fn report_without_direction_markers_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_input(&config, "   NUMBER OF MODES =   2\n   TOTAL MASS =    10.00000\n");

    let err = run(&config).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ParseError>(),
        Some(&ParseError::MarkerNotFound {
            marker: "X  DIRECTION".to_string()
        })
    );
    assert!(output_files(&config).is_empty());
}
