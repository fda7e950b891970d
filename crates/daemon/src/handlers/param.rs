// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{bad_args, to_json};
use crate::error::DaemonError;
use crate::mirror::{Mirror, MutationOp};
use bridge_core::{ObjectId, ParameterValue};
use bridge_wire::ParameterDto;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetParams {
    object_id: String,
    name: String,
    value: ParameterValue,
}

pub fn set(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: SetParams =
        serde_json::from_value(params).map_err(|e| bad_args("param.set", e.to_string()))?;
    let object_id = ObjectId::from_string(&p.object_id);
    mirror.mutate(vec![MutationOp::SetParam {
        object_id,
        name: p.name.clone(),
        value: p.value,
    }])?;
    let param = mirror.get_param(&object_id, &p.name)?;
    to_json(ParameterDto::from(&param))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetParams {
    object_id: String,
    name: String,
}

pub fn get(mirror: &Mirror, params: Value) -> Result<Value, DaemonError> {
    let p: GetParams =
        serde_json::from_value(params).map_err(|e| bad_args("param.get", e.to_string()))?;
    let object_id = ObjectId::from_string(&p.object_id);
    let param = mirror.get_param(&object_id, &p.name)?;
    to_json(ParameterDto::from(&param))
}
