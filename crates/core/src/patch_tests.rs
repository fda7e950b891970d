// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_patch_starts_unmodified_and_open() {
    let p = Patch::new("s1", 100);
    assert!(!p.modified);
    assert_eq!(p.status, PatchStatus::Open);
    assert_eq!(p.created_at, 100);
    assert_eq!(p.updated_at, 100);
}

#[test]
fn touch_marks_modified_and_bumps_updated_at() {
    let mut p = Patch::new("s1", 100);
    p.touch(200);
    assert!(p.modified);
    assert_eq!(p.updated_at, 200);
}

#[test]
fn two_new_patches_have_distinct_ids() {
    let a = Patch::new("a", 0);
    let b = Patch::new("b", 0);
    assert_ne!(a.id, b.id);
}

#[test]
fn patch_serializes_round_trip() {
    let p = Patch::new("s1", 100);
    let json = serde_json::to_string(&p).unwrap();
    let back: Patch = serde_json::from_str(&json).unwrap();
    assert_eq!(p.id, back.id);
    assert_eq!(p.name, back.name);
}
