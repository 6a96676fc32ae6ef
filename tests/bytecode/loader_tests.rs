#[path = "../common/kulac_program.rs"]
mod kulac_program;

use std::{fs, path::PathBuf};

use kula::bytecode::{
    LoadError, encoder::encode, fingerprint::sha256_hex, load, load_bytes, load_from_reader,
    loader::MAGIC_NUMBER, op_code::OpCode::*,
};
use kulac_program::{ProgramBuilder, op, opn, run_ok};

fn temp_file_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("kula_{}_{}.kulac", name, std::process::id()));
    path
}

fn sample_program() -> ProgramBuilder {
    let mut p = ProgramBuilder::new();
    let x = p.symbol("x");
    let value = p.number(41.0);
    let one = p.number(1.0);
    let add_one = p.function(
        &["x"],
        vec![opn(OpLoad, x), opn(OpLoadConst, one), op(OpAdd), op(OpReturnValue)],
    );
    p.emit([
        opn(OpFunction, add_one),
        opn(OpLoadConst, value),
        opn(OpCall, 1),
        opn(OpPrint, 1),
    ]);
    p
}

fn error_message(bytes: &[u8]) -> String {
    load_bytes(bytes).unwrap_err().to_string()
}

#[test]
fn loads_an_artifact_from_disk() {
    let unit = sample_program().build();
    let path = temp_file_path("load_from_disk");
    fs::write(&path, encode(&unit).unwrap()).unwrap();

    let loaded = load(&path);
    let _ = fs::remove_file(&path);

    assert_eq!(loaded.unwrap(), unit);
}

#[test]
fn missing_file_is_an_io_error() {
    let path = temp_file_path("does_not_exist");
    assert!(matches!(load(&path), Err(LoadError::Io(_))));
}

#[test]
fn reader_and_slice_loading_agree() {
    let bytes = encode(&sample_program().build()).unwrap();
    assert_eq!(
        load_from_reader(bytes.as_slice()).unwrap(),
        load_bytes(&bytes).unwrap()
    );
}

#[test]
fn loaded_program_runs() {
    assert_eq!(run_ok(&sample_program().build()), "42\n");
}

#[test]
fn wrong_magic_is_rejected() {
    assert_eq!(error_message(&[0x00, 0x17]), "not a kulac file (magic 0x1700)");
    assert_eq!(
        error_message(&[]),
        "unexpected end of file in header section"
    );
}

#[test]
fn truncation_names_the_section() {
    let bytes = encode(&sample_program().build()).unwrap();

    // magic, then symbol length 1 without its byte
    assert_eq!(
        error_message(&bytes[..3]),
        "unexpected end of file in symbols section"
    );
    // magic, "x", separator, then half of the tag-0x82 payload
    assert_eq!(
        error_message(&bytes[..10]),
        "unexpected end of file in literals section"
    );
}

#[test]
fn function_section_may_end_only_between_functions() {
    let bytes = encode(&sample_program().build()).unwrap();
    let cut = bytes.len() - 1;

    assert_eq!(
        error_message(&bytes[..cut]),
        "unexpected end of file in functions section"
    );
    assert_eq!(load_bytes(&bytes).unwrap().functions().len(), 1);
}

#[test]
fn unknown_literal_tag_is_rejected() {
    let mut bytes = MAGIC_NUMBER.to_le_bytes().to_vec();
    bytes.extend_from_slice(&[0xFF, 0x90]);
    assert_eq!(error_message(&bytes), "undefined literal type 0x90");
}

#[test]
fn unknown_opcode_is_rejected() {
    let mut bytes = MAGIC_NUMBER.to_le_bytes().to_vec();
    bytes.extend_from_slice(&[0xFF, 0xFF, 0x05, 0x20, 0xFF]);
    assert_eq!(
        error_message(&bytes),
        "unknown opcode 0x20 in top-level section"
    );

    let mut bytes = MAGIC_NUMBER.to_le_bytes().to_vec();
    bytes.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0x00, 0x50, 0xFF]);
    assert_eq!(
        error_message(&bytes),
        "unknown opcode 0x50 in functions section"
    );
}

#[test]
fn symbols_must_be_utf8() {
    let mut bytes = MAGIC_NUMBER.to_le_bytes().to_vec();
    bytes.extend_from_slice(&[0x02, 0xC3, 0x28, 0xFF, 0xFF, 0xFF]);
    assert_eq!(
        error_message(&bytes),
        "invalid UTF-8 text in symbols section"
    );
}

#[test]
fn fingerprint_tracks_artifact_bytes() {
    let first = encode(&sample_program().build()).unwrap();
    let mut other = sample_program();
    other.emit([op(OpPop)]);
    let second = encode(&other.build()).unwrap();

    let digest = sha256_hex(&first);
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(digest, sha256_hex(&first));
    assert_ne!(digest, sha256_hex(&second));
}

#[test]
fn json_view_names_opcodes_and_literal_types() {
    let mut p = ProgramBuilder::new();
    let hi = p.text("hi");
    p.emit([opn(OpLoadConst, hi), opn(OpPrint, 1)]);
    let unit = load_bytes(&encode(&p.build()).unwrap()).unwrap();

    let json = serde_json::to_value(&unit).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "symbols": [],
            "literals": [
                { "type": "Bool", "value": false },
                { "type": "Bool", "value": true },
                { "type": "None" },
                { "type": "Text", "value": "hi" }
            ],
            "top_level": [
                { "op": "LOADC", "operand": 3 },
                { "op": "PRINT", "operand": 1 }
            ],
            "functions": []
        })
    );
}
