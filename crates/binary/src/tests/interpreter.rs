use assert_fs::prelude::*;
use elf::abi::{EM_ARM, ET_CORE, ET_DYN, PT_INTERP};

use super::{Image, Segment};
use crate::*;

/// Executable naming `interpreter` in a `PT_INTERP` segment.
fn dynamic_executable(interpreter: &str) -> Vec<u8> {
    let mut image = Image::single_segment();
    image.segments.push(Segment::with_type(PT_INTERP));
    let offset = image.data_offset();
    image.segments[1].offset = offset;
    image.segments[1].filesz = interpreter.len() as u32 + 1;

    image.data.extend_from_slice(interpreter.as_bytes());
    image.data.push(0);
    image.build()
}

fn interpreter_image(machine: u16, e_type: u16) -> Vec<u8> {
    let mut image = Image::single_segment();
    image.machine = machine;
    image.e_type = e_type;
    image.build()
}

#[test]
fn loads_interpreter() {
    let temp = assert_fs::TempDir::new().expect("failed to create temp dir");
    let ld = temp.child("ld-linux.so.2");
    ld.write_binary(&interpreter_image(elf::abi::EM_386, ET_DYN))
        .expect("failed to write interpreter");

    let ld_path = ld.path().to_string_lossy().into_owned();
    let binary =
        Binary::from_bytes("main", dynamic_executable(&ld_path)).expect("valid image");

    let interpreter = binary.interpreter().expect("interpreter should be loaded");
    assert_eq!(interpreter.path(), ld_path);
    assert_eq!(interpreter.arch(), "i386");
    assert_eq!(interpreter.file_type(), FileType::SharedObject);

    // The interpreter segment is not mapped as part of the executable
    assert_eq!(binary.maps().count(), 1);
}

#[test]
fn interpreter_architecture_mismatch() {
    let temp = assert_fs::TempDir::new().expect("failed to create temp dir");
    let ld = temp.child("ld-linux-armhf.so.3");
    ld.write_binary(&interpreter_image(EM_ARM, ET_DYN))
        .expect("failed to write interpreter");

    let ld_path = ld.path().to_string_lossy().into_owned();
    let result = Binary::from_bytes("main", dynamic_executable(&ld_path));
    assert!(
        matches!(
            &result,
            Err(Error::InterpreterMismatch { path, expected: "i386", found: "armv7" }) if *path == ld_path
        ),
        "unexpected result {result:?}"
    );
}

#[test]
fn interpreter_must_not_be_core() {
    let temp = assert_fs::TempDir::new().expect("failed to create temp dir");
    let ld = temp.child("core");
    ld.write_binary(&interpreter_image(elf::abi::EM_386, ET_CORE))
        .expect("failed to write interpreter");

    let ld_path = ld.path().to_string_lossy().into_owned();
    let result = Binary::from_bytes("main", dynamic_executable(&ld_path));
    assert!(
        matches!(result, Err(Error::UnsupportedFileType { file_type }) if file_type == ET_CORE),
        "unexpected result {result:?}"
    );
}

#[test]
fn missing_interpreter() {
    let temp = assert_fs::TempDir::new().expect("failed to create temp dir");
    let ld_path = temp.child("missing.so").path().to_string_lossy().into_owned();
    let result = Binary::from_bytes("main", dynamic_executable(&ld_path));
    assert!(matches!(result, Err(Error::Io { .. })), "unexpected result {result:?}");
}

#[test]
fn self_referential_interpreter() {
    let temp = assert_fs::TempDir::new().expect("failed to create temp dir");
    let program = temp.child("loops");
    let program_path = program.path().to_string_lossy().into_owned();
    program
        .write_binary(&dynamic_executable(&program_path))
        .expect("failed to write program");

    let result = Binary::load(program.path());
    assert!(
        matches!(&result, Err(Error::NestedInterpreter { path }) if *path == program_path),
        "unexpected result {result:?}"
    );
}

#[test]
fn interpreter_with_interpreter() {
    let temp = assert_fs::TempDir::new().expect("failed to create temp dir");
    let first = temp.child("first.so");
    let second = temp.child("second.so");
    let first_path = first.path().to_string_lossy().into_owned();
    let second_path = second.path().to_string_lossy().into_owned();
    first
        .write_binary(&dynamic_executable(&second_path))
        .expect("failed to write first interpreter");
    second
        .write_binary(&dynamic_executable(&first_path))
        .expect("failed to write second interpreter");

    let result = Binary::load(first.path());
    assert!(
        matches!(&result, Err(Error::NestedInterpreter { path }) if *path == second_path),
        "unexpected result {result:?}"
    );
}
