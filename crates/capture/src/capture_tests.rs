// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::channel::Stream;
use crate::console::{Console, Payload};
use crate::sink::MemorySink;
use parking_lot::Mutex;
use rstest::rstest;
use tempfile::TempDir;

fn setup() -> (Multiplexer, MemorySink) {
    let sink = MemorySink::new();
    (
        Multiplexer::new(Console::with_destination(sink.destination())),
        sink,
    )
}

#[rstest]
#[case(Channel::Log)]
#[case(Channel::Error)]
#[case(Channel::Warn)]
#[case(Channel::Info)]
#[case(Channel::Debug)]
#[case(Channel::Trace)]
fn test_exec_captures_each_named_channel(#[case] channel: Channel) {
    let (mux, sink) = setup();
    let capture = Capture::with_multiplexer(Opts::default(), mux.clone());

    capture.exec(|| {
        mux.console().invoke(channel, &Payload::Args(&[&"foo"]));
    });

    assert_eq!(capture.output(), "foo\n");
    assert!(sink.is_empty());
    assert!(!capture.is_capturing());
}

#[rstest]
#[case(Stream::Stdout)]
#[case(Stream::Stderr)]
fn test_exec_captures_raw_writes_when_enabled(#[case] stream: Stream) {
    let (mux, _sink) = setup();
    let capture = Capture::with_multiplexer(Opts::new().stdout(true).stderr(true), mux.clone());

    capture.exec(|| mux.console().write(stream, "foo\n"));

    assert_eq!(capture.output(), "foo\n");
    assert_eq!(capture.session().contents(stream.contents()), "foo\n");
}

#[test]
fn test_raw_writes_ignored_by_default() {
    let (mux, sink) = setup();
    let capture = Capture::with_multiplexer(Opts::default(), mux.clone());

    capture.exec(|| mux.console().write(Stream::Stdout, "passthrough"));

    assert_eq!(capture.output(), "");
    assert_eq!(sink.stdout(), "passthrough");
}

#[test]
fn test_variadic_args() {
    let (mux, _sink) = setup();
    let capture = Capture::with_multiplexer(Opts::default(), mux.clone());

    capture.exec(|| mux.console().log(&[&"foo", &"bar", &"baz"]));

    assert_eq!(capture.output(), "foo bar baz\n");
}

#[test]
fn test_handle_receives_snapshot() {
    let (mux, _sink) = setup();
    let capture = Capture::with_multiplexer(Opts::default(), mux.clone());
    let mut seen = None;

    capture
        .exec(|| {
            mux.console().log(&[&"out"]);
            mux.console().error(&[&"err"]);
        })
        .handle(|data| seen = Some(data.clone()));

    let data = seen.unwrap();
    assert_eq!(data.stdout, "out\n");
    assert_eq!(data.stderr, "err\n");
    assert_eq!(data.output, "out\nerr\n");
}

#[test]
fn test_start_stop_accumulates_across_runs() {
    let (mux, sink) = setup();
    let capture = Capture::with_multiplexer(Opts::default(), mux.clone());

    capture.start();
    mux.console().log(&[&"one"]);
    capture.stop();
    mux.console().log(&[&"gap"]);
    capture.start();
    mux.console().log(&[&"two"]);
    capture.stop();

    assert_eq!(capture.output(), "one\ntwo\n");
    assert_eq!(sink.stdout(), "gap\n");
}

#[test]
fn test_clear_selected_and_reset() {
    let (mux, _sink) = setup();
    let capture = Capture::with_multiplexer(Opts::default(), mux.clone());
    capture.exec(|| {
        mux.console().log(&[&"o"]);
        mux.console().warn(&[&"e"]);
    });

    capture.clear(&[Contents::Stdout, Contents::Output]);
    assert_eq!(capture.stdout(), "");
    assert_eq!(capture.stderr(), "e\n");
    assert_eq!(capture.output(), "");

    capture.reset();
    assert_eq!(capture.buffers(), Buffers::default());
}

#[test]
fn test_set_opts_mid_capture() {
    let (mux, sink) = setup();
    let capture = Capture::with_multiplexer(Opts::default(), mux.clone());

    capture.exec(|| {
        mux.console().info(&[&"captured"]);
        capture.set_opts(&Opts::new().info(false));
        mux.console().info(&[&"released"]);
    });

    assert_eq!(capture.output(), "captured\n");
    assert_eq!(sink.stdout(), "released\n");
    assert!(!capture.opts().get(Channel::Info));
}

#[test]
fn test_set_flag_chains() {
    let (mux, _sink) = setup();
    let capture = Capture::with_multiplexer(Opts::default(), mux);

    capture
        .set_flag(Channel::Stdout, true)
        .set_flag(Channel::Log, false);

    assert!(capture.opts().get(Channel::Stdout));
    assert!(!capture.opts().get(Channel::Log));
}

#[test]
fn test_on_data_streams_text() {
    let (mux, _sink) = setup();
    let capture = Capture::with_multiplexer(Opts::default(), mux.clone());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = Arc::clone(&seen);
    let id = capture.on_data(Contents::Stderr, move |text| {
        record.lock().push(text.to_string());
    });

    capture.exec(|| {
        mux.console().error(&[&"first"]);
        mux.console().log(&[&"not stderr"]);
    });
    assert!(capture.off_data(id));
    capture.exec(|| mux.console().error(&[&"second"]));

    assert_eq!(*seen.lock(), vec!["first\n".to_string()]);
}

#[test]
fn test_concurrent_captures_with_different_opts() {
    let (mux, sink) = setup();
    let console_only = Capture::with_multiplexer(Opts::default(), mux.clone());
    let streams = Capture::with_multiplexer(Opts::streams_only(), mux.clone());

    console_only.start();
    streams.start();
    mux.console().log(&[&"log"]);
    mux.console().write(Stream::Stderr, "raw");
    streams.stop();
    console_only.stop();

    assert_eq!(console_only.output(), "log\n");
    assert_eq!(streams.output(), "raw");
    assert!(sink.is_empty());
}

#[test]
fn test_exec_stops_on_panic() {
    let (mux, _sink) = setup();
    let capture = Capture::with_multiplexer(Opts::default(), mux.clone());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        capture.exec(|| panic!("inside exec"));
    }));

    assert!(result.is_err());
    assert!(!capture.is_capturing());
    assert!(!mux.is_installed());
}

#[test]
fn test_drop_stops_capture() {
    let (mux, sink) = setup();
    {
        let capture = Capture::with_multiplexer(Opts::default(), mux.clone());
        capture.start();
        assert!(mux.is_installed());
    }

    assert!(!mux.is_installed());
    mux.console().log(&[&"free"]);
    assert_eq!(sink.stdout(), "free\n");
}

#[test]
fn test_guard() {
    let (mux, _sink) = setup();
    let capture = Capture::with_multiplexer(Opts::default(), mux.clone());

    {
        let _active = capture.guard();
        assert!(capture.is_capturing());
        mux.console().debug(&[&"guarded"]);
    }

    assert!(!capture.is_capturing());
    assert_eq!(capture.output(), "guarded\n");
}

#[rstest]
#[case(Contents::Output, "o\ne\n")]
#[case(Contents::Stdout, "o\n")]
#[case(Contents::Stderr, "e\n")]
fn test_write_selected_contents(#[case] contents: Contents, #[case] expected: &str) {
    let (mux, _sink) = setup();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("capture.log");
    let capture = Capture::with_multiplexer(Opts::default(), mux.clone());
    capture.exec(|| {
        mux.console().log(&[&"o"]);
        mux.console().error(&[&"e"]);
    });

    capture
        .write(&path, WriteOptions::new().contents(contents))
        .unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn test_write_adds_missing_newline() {
    let (mux, _sink) = setup();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("capture.log");
    let capture = Capture::with_multiplexer(Opts::streams_only(), mux.clone());
    capture.exec(|| mux.console().write(Stream::Stdout, "no newline"));

    capture
        .write(&path, WriteOptions::new())
        .unwrap()
        .write(&path, WriteOptions::new().append(true))
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "no newline\nno newline\n"
    );
}

#[tokio::test]
async fn test_write_async() {
    let (mux, _sink) = setup();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("capture.log");
    let capture = Capture::with_multiplexer(Opts::default(), mux.clone());
    capture.exec(|| mux.console().warn(&[&"async"]));

    capture
        .write_async(&path, WriteOptions::new().contents(Contents::Stderr))
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "async\n");
}
