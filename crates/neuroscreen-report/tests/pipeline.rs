//! End-to-end tests: raw documents in, screening report out.

use chrono::NaiveDate;
use neuroscreen_clinical::{BandTier, Metric};
use neuroscreen_core::TestKind;
use neuroscreen_report::{EngineConfig, ReportAssembler};
use neuroscreen_signal::Transform;
use serde_json::{json, Map, Value};
use std::f64::consts::PI;

fn map(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Gyroscope recording of `freqs` (amplitude, Hz) pairs on a constant offset
fn recording(freqs: &[(f64, f64)], sample_rate_hz: f64, n: usize) -> Value {
    let rows: Vec<Value> = (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate_hz;
            let g: f64 = 2.0
                + freqs
                    .iter()
                    .map(|(amp, f)| amp * (2.0 * PI * f * t).sin())
                    .sum::<f64>();
            json!({"ts": 1_713_139_200.0 + t, "data": [0.1, 0.2, 9.8, g, 0.0, 0.0]})
        })
        .collect();
    json!({"recording": {"recordedData": rows}})
}

fn demographics() -> Map<String, Value> {
    map(json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "birthDate": "15 April 1961 at 00:00:00 UTC+7",
    }))
}

fn full_record() -> Map<String, Value> {
    map(json!({
        "createdAt": {"_seconds": 1713139200, "_nanoseconds": 0},
        "Tremorresting": recording(&[(0.5, 5.0)], 50.0, 200),
        "tremorPostural": recording(&[(1.0, 1.0), (0.4, 6.0)], 50.0, 250),
        "balance": recording(&[(0.5, 2.5)], 100.0, 400),
        "gait": {"recording": {"recordedData": []}},
        "tappingLeft": 64,
        "tappingRight": {"count": 38},
        "questionnaire": {"answers": [1, 2, 0, 3]},
        "riskFactors": {"atRisk": "no"},
        "voice": {"uri": "gs://bucket/voice.wav"},
        "diagnosis": {"text": "None recorded"},
        "notes": "Participant tired",
        "favouriteColour": "green",
    }))
}

#[test]
fn test_full_pipeline() {
    let assembler = ReportAssembler::default();
    let report = assembler.assemble_raw(&demographics(), "rec-42", &full_record(), date(2024, 4, 15));

    assert_eq!(report.record_id, "rec-42");
    assert_eq!(report.recorded_at.as_deref(), Some("2024-04-15T00:00:00.000Z"));
    assert_eq!(report.demographics.name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(report.demographics.age, Some(63));

    assert_eq!(report.tests_administered.len(), 11);
    assert!(report.was_administered(TestKind::TremorResting));
    assert!(report.was_administered(TestKind::Voice));
    assert!(!report.was_administered(TestKind::Cognitive));
    assert!(!report.was_administered(TestKind::Smell));

    let resting = report.frequencies.resting.hz.unwrap();
    assert!((4.75..=5.25).contains(&resting), "resting {}", resting);
    assert_eq!(
        report.band(Metric::RestingTremor).unwrap().text,
        "Within Parkinsonian resting tremor range"
    );

    // The 1 Hz component is outside the tremor band
    let postural = report.frequencies.postural.hz.unwrap();
    assert!((postural - 6.0).abs() <= 0.25, "postural {}", postural);

    let balance = report.frequencies.balance.hz.unwrap();
    assert!((balance - 2.5).abs() <= 0.25, "balance {}", balance);

    assert!(!report.frequencies.gait.is_available());
    assert_eq!(report.band(Metric::Gait).unwrap().tier, BandTier::NoData);

    assert_eq!(report.tap_counts.left, Some(64.0));
    assert_eq!(report.tap_counts.right, Some(38.0));
    assert_eq!(report.band(Metric::TapRight).unwrap().text, "Moderate slowing");

    assert_eq!(report.questionnaire_total, Some(6.0));
    assert_eq!(report.band(Metric::Questionnaire).unwrap().text, "Moderate symptom burden");

    assert_eq!(report.risk_flag, Some(false));
    assert_eq!(report.diagnosis_text.as_deref(), Some("None recorded"));
    assert_eq!(report.free_text_notes.as_deref(), Some("Participant tired"));
}

#[test]
fn test_identical_inputs_identical_json() {
    let assembler = ReportAssembler::default();
    let demographics = demographics();
    let record = full_record();
    let today = date(2024, 4, 15);

    let first = assembler
        .assemble_raw(&demographics, "rec-42", &record, today)
        .to_json()
        .unwrap();
    let second = assembler
        .assemble_raw(&demographics, "rec-42", &record, today)
        .to_json()
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_birthday_boundary() {
    let assembler = ReportAssembler::default();
    let record = assembler.normalize("rec-1", &Map::new());

    let before = assembler.assemble(&demographics(), &record, date(2024, 4, 14));
    let on = assembler.assemble(&demographics(), &record, date(2024, 4, 15));

    assert_eq!(before.demographics.age, Some(62));
    assert_eq!(on.demographics.age, Some(63));
}

#[test]
fn test_unreadable_birth_date_is_absent() {
    let assembler = ReportAssembler::default();
    let record = assembler.normalize("rec-1", &Map::new());

    for birth in [json!("unknown"), json!(null), json!(1961)] {
        let demo = map(json!({"name": "P-1", "dateOfBirth": birth}));
        let report = assembler.assemble(&demo, &record, date(2024, 4, 15));
        assert_eq!(report.demographics.age, None);
        assert_eq!(report.demographics.name.as_deref(), Some("P-1"));
    }
}

#[test]
fn test_missing_tests_map_to_no_data() {
    let report = ReportAssembler::default().assemble_raw(
        &Map::new(),
        "rec-7",
        &map(json!({"tremorresting": null, "tappingLeft": "n/a"})),
        date(2024, 1, 1),
    );

    assert!(report.was_administered(TestKind::TremorResting));
    assert!(report.was_administered(TestKind::TappingLeft));
    assert!(!report.frequencies.resting.is_available());
    assert_eq!(report.tap_counts.left, None);

    for metric in Metric::ALL {
        let band = report.band(metric).unwrap();
        assert_eq!(band.tier, BandTier::NoData, "{}", metric);
        assert_eq!(band.text, "No data");
    }

    assert_eq!(report.risk_flag, None);
    assert_eq!(report.diagnosis_text, None);
}

#[test]
fn test_short_and_nan_recordings_unavailable() {
    let mut rows: Vec<Value> = (0..30)
        .map(|i| json!({"ts": i as f64 / 50.0, "data": [0, 0, 0, 1.0, 0, 0]}))
        .collect();
    // 15 rows with a non-numeric axis leave 15 usable samples
    for row in rows.iter_mut().take(15) {
        row["data"][4] = json!("bad");
    }

    let report = ReportAssembler::default().assemble_raw(
        &Map::new(),
        "rec-8",
        &map(json!({
            "tremorPostural": {"recording": {"recordedData": rows}},
            "balance": recording(&[(0.5, 4.0)], 50.0, 19),
        })),
        date(2024, 1, 1),
    );

    assert!(!report.frequencies.postural.is_available());
    assert!(!report.frequencies.balance.is_available());
}

#[test]
fn test_configured_assembler() {
    let mut config = EngineConfig::default();
    config.spectrum.transform = Transform::Fast;
    config.normalizer.tests = vec![TestKind::TremorResting, TestKind::TappingLeft];
    config.age.utc_offset_minutes = 7 * 60;

    let assembler = ReportAssembler::new(&config).unwrap();
    let demo = map(json!({"birthDate": {"_seconds": -275036400, "_nanoseconds": 0}}));
    let report = assembler.assemble_raw(&demo, "rec-9", &full_record(), date(2024, 4, 15));

    assert_eq!(
        report.tests_administered.iter().copied().collect::<Vec<_>>(),
        vec![TestKind::TremorResting, TestKind::TappingLeft]
    );
    assert_eq!(report.demographics.age, Some(63));

    let resting = report.frequencies.resting.hz.unwrap();
    assert!((4.75..=5.25).contains(&resting), "resting {}", resting);
    assert_eq!(report.tap_counts.right, None);
}
