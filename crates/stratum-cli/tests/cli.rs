//! Thin integration coverage: drives the same library calls the CLI
//! subcommands wrap, rather than spawning the `stratum` binary as a
//! subprocess (library-level tests, thin CLI).

use stratum_facts::Pipeline;
use stratum_langs::json_descriptor;

#[test]
fn check_pipeline_reports_no_diagnostics_for_clean_json() {
    let pipeline = Pipeline::new(json_descriptor());
    let output = pipeline.run(r#"{"a": 1, "b": [2, 3]}"#).unwrap();
    assert!(output.diagnostics.is_empty());
}

#[test]
fn check_pipeline_reports_a_diagnostic_for_malformed_json() {
    let pipeline = Pipeline::new(json_descriptor());
    let output = pipeline.run(r#"{"a": }"#).unwrap();
    assert!(output.diagnostics.has_errors());
}

#[test]
fn roundtrip_matches_for_well_formed_input() {
    let pipeline = Pipeline::new(json_descriptor());
    let result = pipeline.round_trip(r#"{"a": 1}"#).unwrap();
    assert!(result.matches);
}
