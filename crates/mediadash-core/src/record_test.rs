use chrono::NaiveDate;

use super::*;

fn record(day: u32, platform: &str, sentiment: Sentiment, media: &str) -> Record {
    Record {
        date: NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        platform: platform.to_string(),
        sentiment,
        location: "Jakarta".to_string(),
        engagements: 10,
        media_type: media.to_string(),
    }
}

#[test]
fn classify_missing_is_neutral() {
    assert_eq!(Sentiment::classify(None), Sentiment::Neutral);
}

#[test]
fn classify_matches_substrings_case_insensitively() {
    assert_eq!(Sentiment::classify(Some("pos")), Sentiment::Positive);
    assert_eq!(Sentiment::classify(Some("VERY POSITIVE")), Sentiment::Positive);
    assert_eq!(
        Sentiment::classify(Some("Slightly Negative vibes")),
        Sentiment::Negative
    );
    assert_eq!(Sentiment::classify(Some("meh")), Sentiment::Neutral);
    assert_eq!(Sentiment::classify(Some("")), Sentiment::Neutral);
}

#[test]
fn classify_checks_pos_before_neg() {
    assert_eq!(
        Sentiment::classify(Some("negative but positive")),
        Sentiment::Positive
    );
}

#[test]
fn classify_is_stable_on_canonical_labels() {
    for s in Sentiment::ALL {
        assert_eq!(Sentiment::classify(Some(s.as_str())), s);
    }
}

#[test]
fn from_str_is_strict() {
    assert_eq!("Negative".parse::<Sentiment>().unwrap(), Sentiment::Negative);
    assert_eq!(" neutral ".parse::<Sentiment>().unwrap(), Sentiment::Neutral);
    let err = "pos".parse::<Sentiment>().unwrap_err();
    assert!(matches!(err, CoreError::UnknownSentiment(ref s) if s == "pos"));
}

#[test]
fn sentiment_serializes_as_label() {
    let json = serde_json::to_string(&Sentiment::Positive).unwrap();
    assert_eq!(json, "\"Positive\"");
    let back: Sentiment = serde_json::from_str("\"negative\"").unwrap();
    assert_eq!(back, Sentiment::Negative);
}

#[test]
fn canonical_field_names_round_trip() {
    for field in CanonicalField::ALL {
        assert_eq!(CanonicalField::from_name(field.name()), Some(field));
    }
    assert_eq!(CanonicalField::from_name("Date"), None);
}

#[test]
fn date_bounds_of_empty_dataset_is_none() {
    assert!(Dataset::default().date_bounds().is_none());
}

#[test]
fn date_bounds_spans_min_and_max_day() {
    let ds = Dataset::new(vec![
        record(5, "IG", Sentiment::Positive, "Video"),
        record(2, "IG", Sentiment::Positive, "Video"),
        record(9, "IG", Sentiment::Positive, "Video"),
    ]);
    let (lo, hi) = ds.date_bounds().unwrap();
    assert_eq!(lo, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    assert_eq!(hi, NaiveDate::from_ymd_opt(2024, 1, 9).unwrap());
}

#[test]
fn distinct_values_keep_encounter_order() {
    let ds = Dataset::new(vec![
        record(1, "TikTok", Sentiment::Neutral, "Video"),
        record(2, "Instagram", Sentiment::Positive, "Image"),
        record(3, "TikTok", Sentiment::Neutral, "Video"),
    ]);
    assert_eq!(ds.platforms(), vec!["TikTok", "Instagram"]);
    assert_eq!(ds.media_types(), vec!["Video", "Image"]);
    assert_eq!(
        ds.sentiments(),
        vec![Sentiment::Neutral, Sentiment::Positive]
    );
}
