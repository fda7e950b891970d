// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn try_set_rejects_writes_to_read_only_parameter() {
    let mut p = Parameter::new("freq", ParameterValue::Float(440.0), 0);
    p.read_only = true;
    let err = p.try_set(ParameterValue::Float(220.0)).unwrap_err();
    assert_eq!(err.code(), crate::ErrorCode::ReadOnlyParameter);
}

#[test]
fn try_set_rejects_values_outside_declared_range() {
    let mut p = Parameter::new("freq", ParameterValue::Float(440.0), 0);
    p.min = Some(20.0);
    p.max = Some(20_000.0);
    let err = p.try_set(ParameterValue::Float(30_000.0)).unwrap_err();
    assert_eq!(err.code(), crate::ErrorCode::ParameterOutOfRange);
}

#[test]
fn try_set_accepts_values_within_range() {
    let mut p = Parameter::new("freq", ParameterValue::Float(440.0), 0);
    p.min = Some(20.0);
    p.max = Some(20_000.0);
    p.try_set(ParameterValue::Float(880.0)).unwrap();
    assert_eq!(p.value, ParameterValue::Float(880.0));
}

#[test]
fn try_set_updates_type_on_type_change() {
    let mut p = Parameter::new("label", ParameterValue::String("a".into()), 0);
    p.try_set(ParameterValue::Int(3)).unwrap();
    assert_eq!(p.param_type, ParameterType::Int);
}

#[test]
fn value_type_of_matches_variant() {
    assert_eq!(ParameterValue::Int(1).type_of(), ParameterType::Int);
    assert_eq!(ParameterValue::Float(1.0).type_of(), ParameterType::Float);
    assert_eq!(ParameterValue::Bool(true).type_of(), ParameterType::Bool);
    assert_eq!(
        ParameterValue::String("x".into()).type_of(),
        ParameterType::String
    );
}
