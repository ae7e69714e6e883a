use std::cell::RefCell;
use std::rc::Rc;

use parlance_engine as pe;

use pe::vocabulary::EntityVocabulary;
use pe::{DebugEvent, DebugPayload, Parser, Shape};

fn recording_parser() -> (Parser, Rc<RefCell<Vec<DebugEvent>>>) {
    let mut parser = Parser::with_english();
    parser
        .vocabulary_mut()
        .register_entity(EntityVocabulary::new("lamp_id", &["lamp"], &[]));
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    parser.set_debug_callback(move |event| sink.borrow_mut().push(event.clone()));
    (parser, events)
}

#[test]
fn successful_parse_reports_each_stage() {
    let (parser, events) = recording_parser();
    parser.parse("take the lamp").unwrap();
    let events = events.borrow();
    assert_eq!(events.len(), 3);

    match &events[0].payload {
        DebugPayload::Tokenize { input, tokens } => {
            assert_eq!(input, "take the lamp");
            assert_eq!(tokens.len(), 3);
            assert_eq!(tokens[1].word, "the");
            assert!(tokens[2].candidates.contains(&"noun:lamp_id".to_string()));
        },
        other => panic!("expected tokenize, got {other:?}"),
    }
    match &events[1].payload {
        DebugPayload::PatternMatch {
            attempts,
            total_candidates,
            ..
        } => {
            assert_eq!(attempts.len(), 5);
            assert_eq!(*total_candidates, 1);
            let verb_noun = attempts.iter().find(|a| a.shape == Shape::VerbNoun).unwrap();
            assert!(verb_noun.attempted && verb_noun.matched());
            let direction = attempts.iter().find(|a| a.shape == Shape::DirectionOnly).unwrap();
            assert!(!direction.attempted);
        },
        other => panic!("expected pattern match, got {other:?}"),
    }
    match &events[2].payload {
        DebugPayload::CandidateSelection { selected, reason, .. } => {
            assert_eq!(selected.as_ref().unwrap().direct.as_deref(), Some("lamp"));
            assert_eq!(reason, "single_candidate");
        },
        other => panic!("expected selection, got {other:?}"),
    }
}

#[test]
fn failures_are_reported_and_serializable() {
    let (parser, events) = recording_parser();
    assert!(parser.parse("xyzzy").is_err());
    let events = events.borrow();
    let last = events.last().unwrap();
    assert_eq!(last.kind(), "parse_failure");

    let json: serde_json::Value = serde_json::from_str(&last.to_json().unwrap()).unwrap();
    assert_eq!(json["payload"]["type"], "parse_failure");
    assert_eq!(json["payload"]["error"]["kind"], "no_verb");
    assert_eq!(json["payload"]["error"]["position"], 0);
    assert!(json["id"].as_str().is_some_and(|id| id.len() == 36));

    let ids: Vec<_> = events.iter().map(|e| e.id).collect();
    let mut unique = ids.clone();
    unique.dedup();
    assert_eq!(ids.len(), unique.len());
}

#[test]
fn callback_does_not_change_results() {
    let (parser, _events) = recording_parser();
    let quiet = {
        let mut p = Parser::with_english();
        p.vocabulary_mut()
            .register_entity(EntityVocabulary::new("lamp_id", &["lamp"], &[]));
        p
    };
    for input in ["take the lamp", "xyzzy", "north", ""] {
        assert_eq!(parser.parse_with_errors(input), quiet.parse_with_errors(input), "{input}");
    }
}
