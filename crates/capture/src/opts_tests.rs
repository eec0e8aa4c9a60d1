// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[test]
fn test_defaults() {
    let flags = Opts::default().flags();

    for channel in Channel::ALL {
        assert_eq!(flags[channel], !channel.is_raw(), "{channel}");
    }
}

#[test]
fn test_explicit_setting_overrides_default() {
    let opts = Opts::new().log(false).stdout(true);

    assert_eq!(opts.get(Channel::Log), Some(false));
    assert_eq!(opts.get(Channel::Error), None);
    assert!(!opts.resolve(Channel::Log));
    assert!(opts.resolve(Channel::Error));
    assert!(opts.resolve(Channel::Stdout));
    assert!(!opts.resolve(Channel::Stderr));
}

#[test]
fn test_streams_only() {
    let flags = Opts::streams_only().flags();
    let enabled: Vec<Channel> = flags.enabled().collect();
    assert_eq!(enabled, vec![Channel::Stdout, Channel::Stderr]);
}

#[test]
fn test_all() {
    assert_eq!(Opts::all(true).flags().enabled().count(), CHANNEL_COUNT);
    assert_eq!(Opts::all(false).flags().enabled().count(), 0);
}

#[test]
fn test_deserialize_partial() {
    let opts: Opts = serde_json::from_str(r#"{"stdout": true, "warn": false}"#).unwrap();

    assert_eq!(opts, Opts::new().stdout(true).warn(false));
    assert!(opts.resolve(Channel::Log));
}

#[test]
fn test_deserialize_rejects_unknown_channel() {
    let result: Result<Opts, _> = serde_json::from_str(r#"{"dirxml": true}"#);
    assert!(result.is_err());
}

#[test]
fn test_serialize_skips_unset() {
    let json = serde_json::to_string(&Opts::new().error(false)).unwrap();
    assert_eq!(json, r#"{"error":false}"#);
}

#[test]
fn test_flags_serialize_fully_explicit() {
    let flags = Opts::new().stdout(true).flags();
    let value = serde_json::to_value(flags).unwrap();

    assert_eq!(value["stdout"], true);
    assert_eq!(value["stderr"], false);
    assert_eq!(value["log"], true);

    let back: ChannelFlags = serde_json::from_value(value).unwrap();
    assert_eq!(back, flags);
}

#[test]
fn test_flags_set() {
    let mut flags = ChannelFlags::default();
    flags.set(Channel::Debug, false);

    assert!(!flags.get(Channel::Debug));
    assert_eq!(flags.to_opts().debug, Some(false));
    assert_eq!(ChannelFlags::from(&flags.to_opts()), flags);
}
