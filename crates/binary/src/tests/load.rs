use std::collections::BTreeMap;

use assert_fs::prelude::*;
use elf::abi::{EM_ARM, EM_X86_64, ET_DYN, ET_REL, PF_R, PF_W, PF_X, PT_DYNAMIC, PT_LOAD, PT_NULL};

use super::{EHDR_SIZE, Image, PHDR_SIZE, Segment};
use crate::*;

#[test]
fn single_segment_executable() {
    let binary = Binary::from_bytes("test", Image::single_segment().build()).expect("valid image");
    assert_eq!(binary.arch(), "i386");
    assert_eq!(binary.format(), Format::Elf);
    assert_eq!(binary.file_type(), FileType::Executable);
    assert!(binary.interpreter().is_none());

    let maps = binary.maps().collect::<Vec<_>>();
    assert_eq!(
        maps,
        [&MemoryMap {
            virtual_address: 0x1000,
            size: 0x1000,
            permissions: Permissions {
                read: true,
                write: false,
                execute: true,
            },
            file: "test".to_owned(),
            file_offset: 0,
            file_size: u64::from(EHDR_SIZE + PHDR_SIZE),
        }]
    );
    assert_eq!(maps[0].permissions.to_string(), "r x");

    let threads = binary.threads().collect::<Vec<_>>();
    assert_eq!(
        threads,
        [ThreadDescriptor {
            state: ThreadState::Running,
            registers: BTreeMap::from([("EIP", 0x1000)]),
        }]
    );
    assert_eq!(threads[0].state.to_string(), "Running");
}

#[test]
fn maps_restart() {
    let binary = Binary::from_bytes("test", Image::single_segment().build()).expect("valid image");
    assert_eq!(binary.maps().count(), 1);
    assert_eq!(binary.maps().count(), 1);
    assert_eq!(binary.threads().count(), 1);
}

#[test]
fn permissions_render() {
    let cases = [
        (0, "   "),
        (PF_X, "  x"),
        (PF_W, " w "),
        (PF_R, "r  "),
        (PF_R | PF_W, "rw "),
        (PF_R | PF_W | PF_X, "rwx"),
    ];
    for (flags, expected) in cases {
        assert_eq!(
            Permissions::from_segment_flags(flags).to_string(),
            expected
        );
    }
}

#[test]
fn program_counter_per_machine() {
    for (machine, arch, register) in [(EM_X86_64, "amd64", "RIP"), (EM_ARM, "armv7", "PC")] {
        let mut image = Image::single_segment();
        image.machine = machine;
        image.entry = 0x8000;

        let binary = Binary::from_bytes("test", image.build()).expect("valid image");
        assert_eq!(binary.arch(), arch);
        let thread = binary.threads().next().expect("one thread");
        assert_eq!(thread.registers, BTreeMap::from([(register, 0x8000)]));
    }
}

#[test]
fn skips_empty_and_non_loadable_segments() {
    let mut image = Image::executable();
    let mut empty = Segment::load(0);
    empty.memsz = 0;
    let mut data = Segment::load(0);
    data.vaddr = 0x2000;
    data.flags = PF_R | PF_W;

    image.segments = vec![
        Segment::with_type(PT_NULL),
        empty,
        Segment::with_type(PT_DYNAMIC),
        data,
    ];

    let binary = Binary::from_bytes("test", image.build()).expect("valid image");
    let maps = binary.maps().collect::<Vec<_>>();
    assert_eq!(maps.len(), 1);
    assert_eq!(maps[0].virtual_address, 0x2000);
    assert_eq!(maps[0].file_size, 0);
    assert_eq!(maps[0].permissions.to_string(), "rw ");
}

#[test]
fn shared_object() {
    let mut image = Image::single_segment();
    image.e_type = ET_DYN;
    let binary = Binary::from_bytes("libtest.so", image.build()).expect("valid image");
    assert_eq!(binary.file_type(), FileType::SharedObject);
}

#[test]
fn unreadable_segment() {
    let mut image = Image::executable();
    let mut segment = Segment::load(0);
    segment.flags = PF_X;
    image.segments.push(segment);

    let result = Binary::from_bytes("test", image.build());
    assert!(
        matches!(
            result,
            Err(Error::UnreadableSegment {
                virtual_address: 0x1000
            })
        ),
        "unexpected result {result:?}"
    );
}

#[test]
fn segment_outside_file() {
    let mut image = Image::executable();
    image.segments.push(Segment::load(0x10_0000));

    let result = Binary::from_bytes("test", image.build());
    assert!(matches!(result, Err(Error::Parse(_))), "unexpected result {result:?}");
}

#[test]
fn unsupported_file_type() {
    let mut image = Image::single_segment();
    image.e_type = ET_REL;

    let result = Binary::from_bytes("test", image.build());
    assert!(
        matches!(result, Err(Error::UnsupportedFileType { file_type }) if file_type == ET_REL),
        "unexpected result {result:?}"
    );
}

#[test]
fn unsupported_machine() {
    let mut image = Image::single_segment();
    image.machine = 8;

    let result = Binary::from_bytes("test", image.build());
    assert!(
        matches!(result, Err(Error::UnsupportedMachine { machine: 8 })),
        "unexpected result {result:?}"
    );
}

#[test]
fn unknown_format() {
    let result = Binary::from_bytes("test", b"MZ\x90\x00rest".to_vec());
    assert!(
        matches!(&result, Err(Error::UnknownFormat { magic }) if magic == b"MZ\x90\x00"),
        "unexpected result {result:?}"
    );

    let result = Binary::from_bytes("test", Vec::new());
    assert!(matches!(result, Err(Error::UnknownFormat { .. })));
}

#[test]
fn load_from_file() {
    let temp = assert_fs::TempDir::new().expect("failed to create temp dir");
    let file = temp.child("program");
    file.write_binary(&Image::single_segment().build())
        .expect("failed to write image");

    let binary = Binary::load(file.path()).expect("valid image");
    let path = file.path().to_string_lossy();
    assert_eq!(binary.path(), path);
    assert!(binary.maps().all(|map| map.file == path));
}

#[test]
fn load_missing_file() {
    let temp = assert_fs::TempDir::new().expect("failed to create temp dir");
    let result = Binary::load(temp.child("missing").path());
    assert!(matches!(result, Err(Error::Io { .. })), "unexpected result {result:?}");
}

#[test]
fn ignores_unknown_segment_types() {
    let mut image = Image::single_segment();
    image.segments.push(Segment::with_type(PT_LOAD + 0x1000));
    assert!(Binary::from_bytes("test", image.build()).is_ok());
}
