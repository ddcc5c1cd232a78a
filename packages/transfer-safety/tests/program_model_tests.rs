//! Program model loading and report log output

mod common;

use common::TEMPLATE;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;
use transfer_safety::config::ReportConfig;
use transfer_safety::{
    MethodId, NodeId, ProgramModel, Slot, TransferError, TransferSafetyPipeline, VerifierConfig,
};

const MODEL: &str = r#"{
    "capsuleTemplate": "org/demo/Master",
    "nodes": [
        { "id": 1, "method": "Master.run()V" },
        { "id": 2, "method": "Master.drain()V", "context": "recv@4" }
    ],
    "calls": [[1, 2]],
    "objects": [
        { "id": 1, "allocationSite": "Master.run()V@2", "typeName": "Msg" },
        { "id": 2, "allocationSite": "Master.run()V@5", "typeName": "Buf" }
    ],
    "pointsTo": [
        { "reference": { "local": { "node": 1, "slot": 0 } }, "objects": [1] },
        { "reference": { "local": { "node": 1, "slot": 3 } }, "objects": [2] },
        { "reference": { "local": { "node": 2, "slot": 1 } }, "objects": [2] }
    ],
    "fields": [
        { "owner": 1, "field": "payload", "targets": [2] }
    ],
    "sites": [
        { "node": 1, "kind": "invocation", "callee": "Worker.take(LMsg;)V", "instruction": 7,
          "transfers": [0], "liveAfter": [{ "local": { "node": 1, "slot": 3 } }] },
        { "node": 2, "kind": "return", "instruction": 11, "transfers": [1] }
    ],
    "liveAfterNode": []
}"#;

fn pipeline(dir: &TempDir) -> (TransferSafetyPipeline, std::path::PathBuf) {
    let path = dir.path().join("model.json");
    std::fs::write(&path, MODEL).unwrap();
    let pipeline = TransferSafetyPipeline::new(VerifierConfig::default().sequential()).unwrap();
    (pipeline, path)
}

#[test]
fn test_model_file_end_to_end() {
    let dir = TempDir::new().unwrap();
    let (pipeline, path) = pipeline(&dir);

    let mut program = ProgramModel::from_path(&path).unwrap().into_collaborators().unwrap();
    let index = pipeline.run_program(&mut program).unwrap();

    assert_eq!(index.len(), 2);
    assert_eq!(index.stats().unsafe_transfers, 1);
    let unsafe_methods: Vec<&MethodId> = index.unsafe_sites_by_method().keys().collect();
    assert_eq!(unsafe_methods, vec![&MethodId::from("Master.run()V")]);
}

#[test]
fn test_report_log_written_under_template_name() {
    let dir = TempDir::new().unwrap();
    let (pipeline, path) = pipeline(&dir);
    let mut program = ProgramModel::from_path(&path).unwrap().into_collaborators().unwrap();
    let index = pipeline.run_program(&mut program).unwrap();

    let written = pipeline.write_report(&index, dir.path().join("logs")).unwrap();
    assert_eq!(written.file_name().unwrap(), "org.demo.Master.json");

    let report: Value = serde_json::from_str(&std::fs::read_to_string(&written).unwrap()).unwrap();
    assert_eq!(report["capsuleTemplate"], TEMPLATE);
    let sites = report["transferSites"].as_array().unwrap();
    assert_eq!(sites.len(), 2);

    let invocation = &sites[0];
    assert_eq!(invocation["transferringSite"]["kind"], "invocation");
    assert_eq!(invocation["liveVariables"], serde_json::json!(["n1:v3"]));
    let transfer = &invocation["transfers"][0];
    assert_eq!(transfer["transferID"], 0);
    assert_eq!(transfer["isSafeTransfer"], false);
    assert_eq!(transfer["escapedObjects"].as_array().unwrap().len(), 2);

    let ret = &sites[1];
    assert_eq!(ret["transfers"][0]["isSafeTransfer"], true);
    pipeline.finish();
}

#[test]
fn test_compact_report() {
    let config = VerifierConfig::default()
        .sequential()
        .with_report(ReportConfig { pretty: false });
    let pipeline = TransferSafetyPipeline::new(config).unwrap();
    let mut program = ProgramModel::from_json_str(MODEL).unwrap().into_collaborators().unwrap();
    let index = pipeline.run_program(&mut program).unwrap();

    let dir = TempDir::new().unwrap();
    let written = pipeline.write_report(&index, dir.path()).unwrap();
    let content = std::fs::read_to_string(written).unwrap();
    assert!(!content.contains('\n'));
}

#[test]
fn test_model_serialization_preserves_sites() {
    let model = ProgramModel::from_json_str(MODEL).unwrap();
    let reparsed = ProgramModel::from_json_str(&model.to_json().unwrap()).unwrap();

    assert_eq!(reparsed.sites.len(), model.sites.len());
    assert_eq!(reparsed.sites[0].kind, model.sites[0].kind);
    assert_eq!(reparsed.sites[1].transfers, vec![Slot(1)]);
    assert_eq!(reparsed.nodes[1].context.as_deref(), Some("recv@4"));
}

#[test]
fn test_unknown_call_target_rejected() {
    let mut model = ProgramModel::from_json_str(MODEL).unwrap();
    model.calls.push((NodeId(1), NodeId(42)));

    assert!(matches!(
        model.into_collaborators(),
        Err(TransferError::UnknownNode(NodeId(42)))
    ));
}

#[test]
fn test_missing_model_file() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        ProgramModel::from_path(dir.path().join("absent.json")),
        Err(TransferError::Io(_))
    ));
}
