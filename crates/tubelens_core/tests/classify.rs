use tubelens_core::{
    classify, classify_with, BackendNotices, Classification, QueryHeading, ResponseVariant,
};

#[test]
fn heading_frame_yields_only_query_heading() {
    let classification = classify(r#"{"query":"cats","overallSentiment":"positive"}"#);
    assert_eq!(
        classification,
        Classification::Recognized(vec![ResponseVariant::QueryHeading(QueryHeading {
            query: "cats".to_string(),
            overall_sentiment: "positive".to_string(),
            sentiments: Vec::new(),
        })])
    );
}

#[test]
fn heading_requires_both_fields_non_empty() {
    assert_eq!(
        classify(r#"{"query":"cats","overallSentiment":""}"#),
        Classification::Unrecognized
    );
    assert_eq!(
        classify(r#"{"overallSentiment":"positive"}"#),
        Classification::Unrecognized
    );
}

#[test]
fn array_frame_is_a_video_result_list() {
    let classification = classify(r#"[{"title":"T"}, {}]"#);
    let variants = classification.variants();
    assert_eq!(variants.len(), 1);
    match &variants[0] {
        ResponseVariant::VideoResultList(list) => assert_eq!(list.entries.len(), 2),
        other => panic!("unexpected variant {other:?}"),
    }
}

#[test]
fn empty_array_is_still_a_list() {
    match classify("[]").variants() {
        [ResponseVariant::VideoResultList(list)] => assert!(list.entries.is_empty()),
        other => panic!("unexpected variants {other:?}"),
    }
}

#[test]
fn malformed_json_is_reported_not_panicked() {
    match classify("{not json") {
        Classification::Malformed { error } => assert!(!error.is_empty()),
        other => panic!("unexpected classification {other:?}"),
    }
}

#[test]
fn unknown_shapes_are_unrecognized() {
    for raw in [r#"{"foo":1}"#, "42", r#""text""#, "null", r#"{"query":"cats"}"#] {
        assert_eq!(classify(raw), Classification::Unrecognized, "frame {raw}");
    }
}

#[test]
fn one_frame_can_match_several_shapes() {
    let raw = r#"{"query":"cats","overallSentiment":"happy","profileData":{"title":"Cats TV"},"error":"partial"}"#;
    let kinds: Vec<&str> = classify_with(raw, BackendNotices::Render)
        .variants()
        .iter()
        .map(|variant| match variant {
            ResponseVariant::QueryHeading(_) => "heading",
            ResponseVariant::VideoResultList(_) => "list",
            ResponseVariant::ChannelProfile(_) => "profile",
            ResponseVariant::SearchNotice { .. } => "notice",
            ResponseVariant::ProfileError { .. } => "error",
        })
        .collect();
    assert_eq!(kinds, vec!["heading", "profile", "error"]);
    assert_eq!(classify(raw).variants().len(), 2);
}

#[test]
fn backend_notices_are_unrecognized_by_default() {
    for raw in [
        r#"{"query":"zzz","message":"No results found."}"#,
        r#"{"error":"Channel not found"}"#,
    ] {
        assert_eq!(classify(raw), Classification::Unrecognized, "frame {raw}");
        assert_eq!(
            classify_with(raw, BackendNotices::Ignore),
            Classification::Unrecognized,
            "frame {raw}"
        );
    }
}

#[test]
fn error_reply_is_a_profile_error_when_enabled() {
    assert_eq!(
        classify_with(r#"{"error":"Channel not found"}"#, BackendNotices::Render),
        Classification::Recognized(vec![ResponseVariant::ProfileError {
            message: "Channel not found".to_string(),
        }])
    );
}

#[test]
fn no_results_reply_is_a_search_notice_when_enabled() {
    assert_eq!(
        classify_with(
            r#"{"query":"zzz","message":"No results found."}"#,
            BackendNotices::Render
        ),
        Classification::Recognized(vec![ResponseVariant::SearchNotice {
            query: "zzz".to_string(),
            message: "No results found.".to_string(),
        }])
    );
}

#[test]
fn classification_is_idempotent() {
    let frames = [
        r#"{"query":"cats","overallSentiment":"positive","sentiments":[":-)"]}"#,
        r#"[{"title":"T","channelTitle":"C","defaultThumbnail":"x.png"},{"title":"bad"}]"#,
        r#"{"profileData":{"title":"P","recentVideos":[{"videoId":"v","title":"t"}]}}"#,
        "{not json",
        r#"{"unrelated":true}"#,
    ];
    for raw in frames {
        assert_eq!(classify(raw), classify(raw), "frame {raw}");
    }
}
