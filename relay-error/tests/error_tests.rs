// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use relay_error::RelayError;
use std::error::Error;
use std::io;

#[test]
fn test_error_display() {
    let err = RelayError::stream_fault("boom");
    assert_eq!(err.to_string(), "Stream fault: boom");

    let err = RelayError::handler_fault("observer rejected value");
    assert_eq!(err.to_string(), "Handler fault: observer rejected value");
}

#[test]
fn test_error_constructors() {
    let err = RelayError::stream_fault("upstream closed");
    assert!(matches!(err, RelayError::StreamFault { .. }));

    let err = RelayError::handler_fault("handler failed");
    assert!(matches!(err, RelayError::HandlerFault { .. }));

    let err = RelayError::user_error(io::Error::other("disk full"));
    assert!(matches!(err, RelayError::UserError(_)));
}

#[test]
fn test_is_handler_fault() {
    assert!(RelayError::handler_fault("a").is_handler_fault());
    assert!(!RelayError::stream_fault("a").is_handler_fault());

    let aggregated = RelayError::MultipleErrors {
        count: 2,
        errors: vec![RelayError::handler_fault("a"), RelayError::handler_fault("b")],
    };
    assert!(aggregated.is_handler_fault());
}

#[test]
fn test_clone_keeps_user_error_source() {
    let err = RelayError::user_error(io::Error::other("original"));
    let cloned = err.clone();

    assert_eq!(err.to_string(), cloned.to_string());
    assert!(cloned.source().is_some());
}

#[test]
fn test_from_faults_empty_is_ok() {
    assert!(RelayError::from_faults(Vec::new()).is_ok());
}

#[test]
fn test_from_faults_single_is_returned_unchanged() {
    let err = RelayError::from_faults(vec![RelayError::handler_fault("only")]).unwrap_err();
    assert_eq!(err.to_string(), "Handler fault: only");
}

#[test]
fn test_from_faults_many_are_aggregated_in_order() {
    let err = RelayError::from_faults(vec![
        RelayError::handler_fault("first"),
        RelayError::handler_fault("second"),
        RelayError::handler_fault("third"),
    ])
    .unwrap_err();

    match err {
        RelayError::MultipleErrors { count, errors } => {
            assert_eq!(count, 3);
            assert_eq!(errors[0].to_string(), "Handler fault: first");
            assert_eq!(errors[2].to_string(), "Handler fault: third");
        }
        other => panic!("expected MultipleErrors, got {other:?}"),
    }
}

#[test]
fn test_error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RelayError>();
}
