use serde_json::json;

use super::*;

// -----------------------------------------------------------------------
// Fixtures
// -----------------------------------------------------------------------

/// Component-tag document: everything under `item`, `user` present.
fn nested_record() -> Value {
    json!({
        "item": {
            "id": 3_456_789,
            "title": "Bruidtop 'Blanca', croptop maat S/M (38)",
            "description": "Ongedragen bruidstopje!\nKleur: ivoor.",
            "user": {
                "id": 123_456,
                "login": "someuser",
                "last_logged_on_ts": "2023-08-05T19:32:19+02:00",
                "photo": {"full_size_url": "https://images1.vinted.net/seller.jpeg"}
            },
            "photos": [
                {"full_size_url": "https://images1.vinted.net/1.jpeg"},
                {"full_size_url": "https://images1.vinted.net/2.jpeg"}
            ]
        }
    })
}

/// Streamed item object: flat fields, `seller_id` instead of `user`.
fn flat_record() -> Value {
    json!({
        "id": 42,
        "title": "Pull marin",
        "description": "Laine",
        "seller_id": 987_654,
        "photos": [
            {"full_size_url": "https://images1.vinted.net/a.jpeg"},
            {"full_size_url": "https://images1.vinted.net/b.jpeg"},
            {"full_size_url": "https://images1.vinted.net/a.jpeg"}
        ]
    })
}

// -----------------------------------------------------------------------
// Nested schema
// -----------------------------------------------------------------------

#[test]
fn nested_record_exposes_all_fields() {
    let details = ItemDetails::new(nested_record());
    assert_eq!(details.title(), "Bruidtop 'Blanca', croptop maat S/M (38)");
    assert_eq!(details.description(), "Ongedragen bruidstopje!\nKleur: ivoor.");
    assert_eq!(details.seller(), "someuser");
    assert_eq!(details.seller_id().unwrap(), 123_456);
    assert_eq!(
        details
            .seller_last_logged_in(LastLoginPolicy::Lenient)
            .unwrap(),
        "2023-08-05T19:32:19+02:00"
    );
    assert_eq!(
        details.seller_photo_url().as_deref(),
        Some("https://images1.vinted.net/seller.jpeg")
    );
    assert_eq!(
        details.full_size_photo_urls().unwrap(),
        vec![
            "https://images1.vinted.net/1.jpeg",
            "https://images1.vinted.net/2.jpeg"
        ]
    );
}

#[test]
fn misspelled_last_login_key_is_accepted() {
    let mut record = nested_record();
    let user = record["item"]["user"].as_object_mut().unwrap();
    user.remove("last_logged_on_ts");
    user.insert("last_loged_on_ts".into(), json!("2023-10-12T19:28:44+01:00"));
    let details = ItemDetails::new(record);
    assert_eq!(
        details.seller_last_logged_in(LastLoginPolicy::Strict).unwrap(),
        "2023-10-12T19:28:44+01:00"
    );
}

#[test]
fn empty_correct_spelling_falls_back_to_misspelled_key() {
    let mut record = nested_record();
    record["item"]["user"]["last_logged_on_ts"] = json!("");
    record["item"]["user"]["last_loged_on_ts"] = json!("2024-01-01T00:00:00+01:00");
    let details = ItemDetails::new(record);
    assert_eq!(
        details.seller_last_logged_in(LastLoginPolicy::Lenient).unwrap(),
        "2024-01-01T00:00:00+01:00"
    );
}

#[test]
fn missing_avatar_object_yields_none() {
    let mut record = nested_record();
    record["item"]["user"]
        .as_object_mut()
        .unwrap()
        .remove("photo");
    assert!(ItemDetails::new(record).seller_photo_url().is_none());
}

#[test]
fn null_avatar_or_empty_url_yields_none() {
    let mut record = nested_record();
    record["item"]["user"]["photo"] = Value::Null;
    assert!(ItemDetails::new(record.clone()).seller_photo_url().is_none());

    record["item"]["user"]["photo"] = json!({"full_size_url": ""});
    assert!(ItemDetails::new(record).seller_photo_url().is_none());
}

// -----------------------------------------------------------------------
// Flat schema
// -----------------------------------------------------------------------

#[test]
fn flat_record_resolves_seller_id_from_top_level() {
    let details = ItemDetails::new(flat_record());
    assert_eq!(details.seller_id().unwrap(), 987_654);
    assert_eq!(details.title(), "Pull marin");
}

#[test]
fn flat_record_without_user_defaults_seller_fields() {
    let details = ItemDetails::new(flat_record());
    assert_eq!(details.seller(), "");
    assert!(details.seller_photo_url().is_none());
    assert_eq!(
        details.seller_last_logged_in(LastLoginPolicy::Lenient).unwrap(),
        ""
    );
}

#[test]
fn strict_policy_rejects_missing_last_login() {
    let err = ItemDetails::new(flat_record())
        .seller_last_logged_in(LastLoginPolicy::Strict)
        .unwrap_err();
    assert!(
        matches!(err, ScraperError::MissingField { field } if field == "seller last logged in")
    );
}

#[test]
fn photo_urls_keep_order_and_duplicates() {
    let urls = ItemDetails::new(flat_record()).full_size_photo_urls().unwrap();
    assert_eq!(urls.len(), 3);
    assert_eq!(urls[0], urls[2]);
    assert_eq!(urls[1], "https://images1.vinted.net/b.jpeg");
}

#[test]
fn string_seller_id_is_parsed() {
    let mut record = flat_record();
    record["seller_id"] = json!("987654");
    assert_eq!(ItemDetails::new(record).seller_id().unwrap(), 987_654);
}

#[test]
fn user_id_takes_precedence_over_seller_id() {
    let mut record = flat_record();
    record["user"] = json!({"id": 1, "login": "flatuser"});
    let details = ItemDetails::new(record);
    assert_eq!(details.seller_id().unwrap(), 1);
    assert_eq!(details.seller(), "flatuser");
}

// -----------------------------------------------------------------------
// Failure and purity
// -----------------------------------------------------------------------

#[test]
fn missing_seller_id_is_an_error() {
    let details = ItemDetails::new(json!({"title": "orphan"}));
    let err = details.seller_id().unwrap_err();
    assert!(matches!(err, ScraperError::MissingField { field } if field == "seller id"));
}

#[test]
fn missing_text_fields_default_to_empty() {
    let details = ItemDetails::new(json!({"seller_id": 5}));
    assert_eq!(details.title(), "");
    assert_eq!(details.description(), "");
    assert!(details.full_size_photo_urls().unwrap().is_empty());
}

#[test]
fn photo_entry_without_url_is_an_error() {
    for broken in [json!({"thumbnails": []}), json!({"full_size_url": null})] {
        let details = ItemDetails::new(json!({
            "photos": [{"full_size_url": "a"}, broken, {"full_size_url": "b"}]
        }));
        let err = details.full_size_photo_urls().unwrap_err();
        assert!(
            matches!(err, ScraperError::MissingField { field } if field == "photo full_size_url"),
            "expected MissingField, got: {err:?}"
        );
    }
}

#[test]
fn photo_url_count_matches_photo_entries() {
    let details = ItemDetails::new(json!({
        "photos": [{"full_size_url": "a"}, {"full_size_url": ""}, {"full_size_url": "a"}]
    }));
    let urls = details.full_size_photo_urls().unwrap();
    assert_eq!(urls.len(), 3);
    assert_eq!(urls, vec!["a", "", "a"]);
}

#[test]
fn accessors_do_not_mutate_the_record() {
    let record = nested_record();
    let details = ItemDetails::new(record.clone());
    let first = details.summary("src", LastLoginPolicy::Lenient).unwrap();
    let second = details.summary("src", LastLoginPolicy::Lenient).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        details.full_size_photo_urls().unwrap(),
        details.full_size_photo_urls().unwrap()
    );
    assert_eq!(details.data(), &record);
}

#[test]
fn summary_collects_six_fields() {
    let summary = ItemDetails::new(nested_record())
        .summary("https://www.vinted.nl/items/3456789-bruidtop", LastLoginPolicy::Lenient)
        .unwrap();
    assert_eq!(summary.source, "https://www.vinted.nl/items/3456789-bruidtop");
    assert_eq!(summary.seller_id, 123_456);
    assert_eq!(summary.seller, "someuser");
}

#[test]
fn record_round_trips_through_pretty_json() {
    let details = ItemDetails::new(nested_record());
    let text = serde_json::to_string_pretty(details.data()).unwrap();
    let reparsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(&reparsed, details.data());
    assert_eq!(serde_json::to_string_pretty(&reparsed).unwrap(), text);
}
