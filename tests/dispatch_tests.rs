//! Dispatcher Tests
//!
//! Tests verify:
//! - Virtual writes reach the pin's writer with tag and pin stripped
//! - Virtual reads produce a "vw" reply filled by the pin's reader
//! - Unroutable frames are dropped without a reply
//! - Registration replaces and unregistration removes handlers

use std::sync::Arc;

use parking_lot::Mutex;
use pinwire::handler::{Dispatcher, PinReader, ReaderFn, WriterFn, VIRTUAL_WRITE};
use pinwire::protocol::{Body, Command};

type Calls = Arc<Mutex<Vec<(u32, Vec<String>)>>>;

fn recording_writer(calls: &Calls) -> Arc<WriterFn<impl Fn(u32, &Body) + Send + Sync>> {
    let calls = Arc::clone(calls);
    Arc::new(WriterFn(move |pin: u32, params: &Body| {
        calls.lock().push((pin, params.fields().to_vec()));
    }))
}

fn hardware(fields: &[&str]) -> Body {
    fields.iter().copied().collect()
}

// =============================================================================
// Virtual Write Tests
// =============================================================================

#[test]
fn test_virtual_write_invokes_writer() {
    let dispatcher = Dispatcher::new();
    let calls: Calls = Arc::default();
    dispatcher.register_writer(5, recording_writer(&calls));

    let reply = dispatcher.dispatch(hardware(&["vw", "5", "42"]));

    assert!(reply.is_none());
    assert_eq!(*calls.lock(), vec![(5, vec!["42".to_string()])]);
}

#[test]
fn test_virtual_write_passes_all_remaining_fields() {
    let dispatcher = Dispatcher::new();
    let calls: Calls = Arc::default();
    dispatcher.register_writer(1, recording_writer(&calls));

    dispatcher.dispatch(hardware(&["vw", "1", "10", "20", "30"]));

    let expected: Vec<String> = vec!["10".into(), "20".into(), "30".into()];
    assert_eq!(*calls.lock(), vec![(1, expected)]);
}

#[test]
fn test_virtual_write_without_writer_is_ignored() {
    let dispatcher = Dispatcher::new();
    let calls: Calls = Arc::default();
    dispatcher.register_writer(6, recording_writer(&calls));

    let reply = dispatcher.dispatch(hardware(&["vw", "5", "42"]));

    assert!(reply.is_none());
    assert!(calls.lock().is_empty());
}

// =============================================================================
// Virtual Read Tests
// =============================================================================

#[test]
fn test_virtual_read_builds_vw_reply() {
    let dispatcher = Dispatcher::new();
    dispatcher.register_reader(
        7,
        Arc::new(ReaderFn(|_pin: u32, out: &mut Body| {
            out.push_int(23).push_str("on");
        })),
    );

    let reply = dispatcher.dispatch(hardware(&["vr", "7"])).expect("reply");

    assert_eq!(reply.command(), Some(Command::Hardware));
    assert_eq!(reply.header.id, 0);
    assert_eq!(reply.body, hardware(&[VIRTUAL_WRITE, "7", "23", "on"]));
}

#[test]
fn test_virtual_read_without_reader_is_ignored() {
    let dispatcher = Dispatcher::new();
    assert!(dispatcher.dispatch(hardware(&["vr", "7"])).is_none());
}

#[test]
fn test_reader_trait_object() {
    struct Constant(i64);

    impl PinReader for Constant {
        fn read(&self, _pin: u32, out: &mut Body) {
            out.push_int(self.0);
        }
    }

    let dispatcher = Dispatcher::new();
    dispatcher.register_reader(3, Arc::new(Constant(99)));

    let reply = dispatcher.dispatch(hardware(&["vr", "3"])).expect("reply");
    assert_eq!(reply.body.get(2), Some("99"));
}

// =============================================================================
// Malformed Frame Tests
// =============================================================================

#[test]
fn test_malformed_frames_are_dropped() {
    let dispatcher = Dispatcher::new();
    let calls: Calls = Arc::default();
    dispatcher.register_writer(5, recording_writer(&calls));
    dispatcher.register_reader(5, Arc::new(ReaderFn(|_pin: u32, out: &mut Body| {
        out.push_int(1);
    })));

    let frames = [
        hardware(&[]),
        hardware(&["vw"]),
        hardware(&["vw", "five", "1"]),
        hardware(&["vw", "-5", "1"]),
        hardware(&["vr", ""]),
        hardware(&["dw", "5", "1"]),
        hardware(&["pm", "5", "out"]),
    ];

    for frame in frames {
        assert!(dispatcher.dispatch(frame).is_none());
    }
    assert!(calls.lock().is_empty());
}

// =============================================================================
// Registration Tests
// =============================================================================

#[test]
fn test_last_registration_wins() {
    let dispatcher = Dispatcher::new();
    let first: Calls = Arc::default();
    let second: Calls = Arc::default();

    dispatcher.register_writer(2, recording_writer(&first));
    dispatcher.register_writer(2, recording_writer(&second));
    dispatcher.dispatch(hardware(&["vw", "2", "x"]));

    assert!(first.lock().is_empty());
    assert_eq!(second.lock().len(), 1);
}

#[test]
fn test_unregister_removes_handler() {
    let dispatcher = Dispatcher::new();
    let calls: Calls = Arc::default();
    dispatcher.register_writer(4, recording_writer(&calls));

    assert!(dispatcher.unregister_writer(4));
    assert!(!dispatcher.unregister_writer(4));
    dispatcher.dispatch(hardware(&["vw", "4", "x"]));

    assert!(calls.lock().is_empty());
}
