//! Library integration tests.

use vigil::{parse_to_severity, Notification, Severity, VigilError};

#[test]
fn error_types_are_public() {
    let err = VigilError::UnrecognizedSeverity {
        text: "loud".into(),
    };
    assert!(err.to_string().contains("loud"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> vigil::Result<Severity> {
        parse_to_severity("info")
    }
    assert_eq!(test_fn().unwrap(), Severity::Info);
}

#[test]
fn every_case_permutation_parses() {
    for severity in Severity::ALL {
        let name = severity.name();
        let variants = [
            name.to_lowercase(),
            name.to_uppercase(),
            name.chars()
                .enumerate()
                .map(|(i, c)| {
                    if i % 2 == 0 {
                        c.to_ascii_uppercase()
                    } else {
                        c.to_ascii_lowercase()
                    }
                })
                .collect(),
        ];
        for variant in variants {
            assert_eq!(parse_to_severity(&variant).unwrap(), severity, "{variant}");
        }
    }
}

#[test]
fn unknown_severities_fail() {
    for text in ["", "warn", "errors", " info", "critical"] {
        match parse_to_severity(text) {
            Err(VigilError::UnrecognizedSeverity { text: offending }) => assert_eq!(offending, text),
            other => panic!("unexpected result for {text:?}: {other:?}"),
        }
    }
}

#[test]
fn notifications_render_with_severity() {
    assert_eq!(
        Notification::warning("careful").to_string(),
        "[warning] careful"
    );
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use vigil::cli::{Cli, Commands};

    let cli = Cli::parse_from(["vigil", "rules", "--json"]);
    match cli.command {
        Commands::Rules(args) => assert!(args.json),
        other => panic!("unexpected command: {other:?}"),
    }
}
