// retag-core/tests/rewrite_scenarios.rs
//
// End-to-end scenarios through config -> processor -> router.

use anyhow::Result;

use retag_core::{
    rewrite_events, BatchOutcome, BatchProcessor, Event, Record, RewriteConfig, RuleConfig,
    VecRouter,
};

fn record(fields: &[(&str, &str)]) -> Record {
    fields.iter().copied().collect()
}

#[test]
fn prefix_swap_forwards_with_new_tag() -> Result<()> {
    // remove_prefix=app, add_prefix=out, tag "app.web", no rules.
    let config = RewriteConfig {
        remove_prefix: Some("app".into()),
        add_prefix: Some("out".into()),
        ..Default::default()
    };
    let emitted = rewrite_events(&config, "app.web", vec![Event::now(record(&[("k", "v")]))])?;
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].0, "out.web");
    Ok(())
}

#[test]
fn ignore_rule_forwards_nothing() -> Result<()> {
    let config = RewriteConfig {
        rules: vec![RuleConfig {
            key: Some("level".into()),
            pattern: Some("error".into()),
            ignore: true,
            ..Default::default()
        }],
        ..Default::default()
    };
    let emitted = rewrite_events(
        &config,
        "in",
        vec![Event::now(record(&[("level", "error")]))],
    )?;
    assert!(emitted.is_empty());
    Ok(())
}

#[test]
fn captured_id_extends_tag() -> Result<()> {
    let config = RewriteConfig {
        rules: vec![RuleConfig {
            key: Some("msg".into()),
            pattern: Some(r"id=(\d+)".into()),
            append_to_tag: true,
            ..Default::default()
        }],
        ..Default::default()
    };
    let emitted = rewrite_events(&config, "in", vec![Event::now(record(&[("msg", "id=42")]))])?;
    assert_eq!(emitted[0].0, "in.42");
    Ok(())
}

#[test]
fn fallback_extends_tag_on_no_match() -> Result<()> {
    let config = RewriteConfig {
        rules: vec![RuleConfig {
            key: Some("msg".into()),
            pattern: Some("x".into()),
            append_to_tag: true,
            fallback: Some("none".into()),
            ..Default::default()
        }],
        ..Default::default()
    };
    let emitted = rewrite_events(&config, "in", vec![Event::now(record(&[("msg", "y")]))])?;
    assert_eq!(emitted[0].0, "in.none");
    Ok(())
}

// test_log surfaces the suppression warning when the test runs with
// RUST_LOG set.
#[test_log::test]
fn no_matching_rule_suppresses_record() -> Result<()> {
    let config = RewriteConfig {
        enable_warnings: true,
        rules: vec![RuleConfig {
            key: Some("level".into()),
            pattern: Some("fatal".into()),
            append_to_tag: true,
            tag: Some("alerts".into()),
            ..Default::default()
        }],
        ..Default::default()
    };
    let processor = BatchProcessor::new(&config)?;
    let mut router = VecRouter::default();
    let outcome = processor.process_batch(
        "in",
        vec![Event::now(record(&[("level", "info")]))],
        &mut router,
    )?;
    assert_eq!(outcome, BatchOutcome { emitted: 0, suppressed: 1 });
    assert!(router.emitted.is_empty());
    Ok(())
}

#[test]
fn prefix_transform_then_rules_compose() -> Result<()> {
    // Base tag is computed once per batch; each record starts fresh from it.
    let config = RewriteConfig {
        remove_prefix: Some("raw".into()),
        rules: vec![RuleConfig {
            key: Some("status".into()),
            pattern: Some(r"(\d)\d\d".into()),
            append_to_tag: true,
            ..Default::default()
        }],
        ..Default::default()
    };
    let events = vec![
        Event::now(record(&[("status", "200")])),
        Event::now(record(&[("status", "503")])),
    ];
    let emitted = rewrite_events(&config, "raw.http", events)?;
    let tags: Vec<&str> = emitted.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(tags, vec!["http.2", "http.5"]);
    Ok(())
}

#[test]
fn replace_mutates_forwarded_record() -> Result<()> {
    let config = RewriteConfig {
        add_prefix: Some("masked".into()),
        rules: vec![RuleConfig {
            key: Some("msg".into()),
            pattern: Some(r"\d{3}-\d{2}-\d{4}".into()),
            replace: Some("[SSN]".into()),
            ..Default::default()
        }],
        ..Default::default()
    };
    let emitted = rewrite_events(
        &config,
        "in",
        vec![Event::now(record(&[("msg", "ssn 123-45-6789 on file")]))],
    )?;
    assert_eq!(emitted[0].0, "masked.in");
    assert_eq!(emitted[0].1.record.get("msg"), Some("ssn [SSN] on file"));
    Ok(())
}

#[test]
fn first_matching_ignore_wins_over_later_rules() -> Result<()> {
    let config = RewriteConfig {
        rules: vec![
            RuleConfig {
                key: Some("level".into()),
                pattern: Some("noise".into()),
                ignore: true,
                ..Default::default()
            },
            RuleConfig {
                key: Some("level".into()),
                pattern: Some("noise".into()),
                append_to_tag: true,
                tag: Some("kept".into()),
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    let emitted = rewrite_events(
        &config,
        "in",
        vec![Event::now(record(&[("level", "noise")]))],
    )?;
    assert!(emitted.is_empty());
    Ok(())
}
