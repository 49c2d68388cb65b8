//! Integration tests for the parsing pipeline.

use std::fs;

use chatlens::analysis::Report;
use chatlens::config::{AnalysisConfig, FilterConfig};
use chatlens::parser::ChatParser;
use chatlens::parsing::normalize_timestamp;
use chatlens::{ChatlensError, MessageRecord};
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::tempdir;

fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

const GROUP_EXPORT: &str = "\u{feff}[15/03/2020, 08:00:00] Ana: \u{200e}Ana criou este grupo
[15/03/2020, 08:00:01] Ana: \u{200e}As mensagens e as chamadas são protegidas com a criptografia de ponta a ponta.
[15/03/2020, 08:01:00] Ana: Bom dia, gente!
[15/03/2020, 08:02:30] Bia: Começou a quarentena
ninguém sai de casa
[15/03/2020, 08:03:00] Você: eu vou ao mercado
[15/03/2020, 08:04:00] Caio: figurinha omitida
[16/03/2020, 21:15:00] +55 11 91234-5678: Porra, acabou o álcool em gel 😷
[16/03/2020, 21:16:00] Bia: 😂😂 pqp

[01/04/2020, 12:00:00] Caio: Alguém tem máscara?
";

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn single_header_line() {
    let parsed = ChatParser::new()
        .parse_lines(["[01/02/2021, 09:00:00] Ana: Bom dia"])
        .unwrap();
    assert_eq!(
        parsed.table.records(),
        [MessageRecord::new(ts(2021, 2, 1, 9, 0, 0), "Ana", "Bom dia")]
    );
}

#[test]
fn continuation_is_joined_with_space() {
    let parsed = ChatParser::new()
        .parse_lines(["[01/02/2021, 09:00:00] Ana: Olha isso", "algo sem cabeçalho"])
        .unwrap();
    assert_eq!(parsed.table.len(), 1);
    assert_eq!(parsed.table.records()[0].message, "Olha isso algo sem cabeçalho");
}

#[test]
fn header_with_empty_message_starts_new_record() {
    let parsed = ChatParser::new()
        .parse_str("[01/02/2021, 09:00:00] Ana: oi\n[01/02/2021, 09:01:00] Bia: \nsegunda linha")
        .unwrap();
    assert_eq!(
        parsed.table.records(),
        [
            MessageRecord::new(ts(2021, 2, 1, 9, 0, 0), "Ana", "oi"),
            MessageRecord::new(ts(2021, 2, 1, 9, 1, 0), "Bia", " segunda linha"),
        ]
    );
}

#[test]
fn sticker_placeholder_is_excluded() {
    let parsed = ChatParser::new()
        .parse_lines([
            "[01/02/2021, 09:00:00] Ana: Oi",
            "[01/02/2021, 09:01:00] Bia: figurinha omitida",
        ])
        .unwrap();
    assert_eq!(parsed.table.len(), 1);
    assert_eq!(parsed.table.records()[0].author, "Ana");
    assert_eq!(parsed.report.excluded_media, 1);
}

#[test]
fn both_date_layouts_normalize_to_same_value() {
    let spaced = normalize_timestamp("01/02/2021 09:00:00").unwrap();
    let comma = normalize_timestamp("01/02/2021, 09:00:00").unwrap();
    assert_eq!(spaced, comma);
    assert_eq!(spaced, ts(2021, 2, 1, 9, 0, 0));

    // Through the full pipeline: a whitespace character before the space
    let parsed = ChatParser::new()
        .parse_lines([
            "[01/02/2021\u{a0} 09:00:00] Ana: sem vírgula",
            "[01/02/2021, 09:00:00] Bia: com vírgula",
        ])
        .unwrap();
    let stamps: Vec<_> = parsed.table.iter().map(|r| r.timestamp).collect();
    assert_eq!(stamps, [ts(2021, 2, 1, 9, 0, 0), ts(2021, 2, 1, 9, 0, 0)]);
}

#[test]
fn self_author_excluded_only_when_enabled() {
    let lines = ["[01/02/2021, 09:00:00] Você: minha mensagem"];

    let strict = ChatParser::new().parse_lines(lines).unwrap();
    assert!(strict.table.is_empty());
    assert_eq!(strict.report.excluded_self_author, 1);

    let config = FilterConfig::new().with_exclude_self_author(false);
    let kept = ChatParser::with_config(config).parse_lines(lines).unwrap();
    assert_eq!(kept.table.records()[0].author, "Você");
}

// ============================================================================
// Edge behavior
// ============================================================================

#[test]
fn invalid_date_is_skipped_and_neighbours_kept() {
    let parsed = ChatParser::new()
        .parse_lines([
            "[01/02/2021, 09:00:00] Ana: antes",
            "[32/13/2021, 09:01:00] Ana: inválida",
            "[01/02/2021, 09:02:00] Bia: depois",
        ])
        .unwrap();
    let messages: Vec<_> = parsed.table.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, ["antes", "depois"]);
    assert_eq!(parsed.report.invalid_timestamps, 1);
}

#[test]
fn continuations_of_excluded_record_are_dropped() {
    let parsed = ChatParser::new()
        .parse_lines([
            "[01/02/2021, 09:00:00] Ana: figurinha omitida",
            "continuação que some junto",
            "[01/02/2021, 09:01:00] Bia: fica",
        ])
        .unwrap();
    assert_eq!(parsed.table.len(), 1);
    assert!(parsed.table.iter().all(|r| !r.message.contains("continuação")));
}

#[test]
fn orphan_lines_before_first_header_are_discarded() {
    let parsed = ChatParser::new()
        .parse_str("lixo do início\nmais lixo\n[01/02/2021, 09:00:00] Ana: Oi")
        .unwrap();
    assert_eq!(parsed.table.len(), 1);
    assert_eq!(parsed.table.records()[0].message, "Oi");
    assert_eq!(parsed.report.orphan_lines, 2);
}

#[test]
fn invalid_utf8_aborts_with_line_number() {
    let lines: Vec<&[u8]> = vec![
        b"[01/02/2021, 09:00:00] Ana: Oi",
        b"tudo bem?",
        b"\xe9 isso",
    ];
    let err = ChatParser::new().parse_lines(lines).unwrap_err();
    match err {
        ChatlensError::Decode { line, .. } => assert_eq!(line, 3),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn out_of_order_timestamps_are_preserved() {
    let parsed = ChatParser::new()
        .parse_lines([
            "[02/02/2021, 09:00:00] Ana: depois",
            "[01/02/2021, 09:00:00] Bia: antes",
        ])
        .unwrap();
    assert_eq!(parsed.table.records()[0].message, "depois");
}

// ============================================================================
// Files and reports
// ============================================================================

#[test]
fn parse_group_export_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("_chat.txt");
    fs::write(&path, GROUP_EXPORT).unwrap();

    let parsed = ChatParser::new().parse_file(&path).unwrap();
    let authors: Vec<_> = parsed.table.iter().map(|r| r.author.as_str()).collect();
    assert_eq!(authors, ["Ana", "Bia", "+55 11 91234-5678", "Bia", "Caio"]);
    assert_eq!(
        parsed.table.records()[1].message,
        "Começou a quarentena ninguém sai de casa"
    );

    let report = parsed.report;
    assert_eq!(report.records_assembled, 9);
    assert_eq!(report.excluded_system_events, 2);
    assert_eq!(report.excluded_self_author, 1);
    assert_eq!(report.excluded_media, 1);
    assert_eq!(report.blank_lines, 1);
    assert_eq!(report.records_assembled, report.records_kept + report.skipped());
}

#[test]
fn lenient_config_keeps_system_events() {
    let parsed = ChatParser::with_config(FilterConfig::lenient())
        .parse_str(GROUP_EXPORT)
        .unwrap();
    assert_eq!(parsed.table.len(), 8);
    assert_eq!(parsed.table.records()[0].timestamp, ts(2020, 3, 15, 8, 0, 0));
}

#[test]
fn report_over_group_export() {
    let parsed = ChatParser::new().parse_str(GROUP_EXPORT).unwrap();
    let report = Report::build(&parsed.table, &AnalysisConfig::default()).unwrap();

    assert_eq!(report.total_messages, 5);
    assert_eq!(report.pandemic.messages, 2);
    assert_eq!(report.profanity.messages, 2);
    assert_eq!(report.top_emojis[0].emoji, "😂");
    assert_eq!(report.top_emojis[0].count, 2);
    assert_eq!(report.activity.per_period.len(), 2);
}

#[cfg(feature = "streaming")]
#[test]
fn streaming_matches_batch_on_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("_chat.txt");
    fs::write(&path, GROUP_EXPORT).unwrap();

    let parser = ChatParser::new();
    let batch = parser.parse_file(&path).unwrap();
    let mut stream = parser.stream_file(&path).unwrap();
    let streamed: Vec<_> = stream.by_ref().collect::<Result<_, _>>().unwrap();

    assert_eq!(streamed, batch.table.into_records());
    assert_eq!(stream.report(), batch.report);
    assert!((stream.progress().unwrap() - 100.0).abs() < f64::EPSILON);
}
