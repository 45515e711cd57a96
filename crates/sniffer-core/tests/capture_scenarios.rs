//! End-to-end capture scenarios
//!
//! Drives the recorder the way the BLE adapter does: radio state reports go
//! through the scan state machine, advertisement reports go straight into the
//! handler. Everything runs against in-memory sinks or temporary files.

use std::cell::Cell;

use sniffer_core::{
    AddressType, AdvertisementEvent, CaptureRecorder, FilenameScheme, LogStream, RadioState,
    ScanAction, ScanEventHandler, ScanState, TimeSource, Timestamp, LOG_HEADER,
};

// ----------------------------------------------------------------------------
// Test Utilities
// ----------------------------------------------------------------------------

/// Clock that returns a scripted sequence of timestamps
struct ScriptedClock {
    times: Vec<u64>,
    next: Cell<usize>,
}

impl ScriptedClock {
    fn new(times: &[u64]) -> Self {
        Self {
            times: times.to_vec(),
            next: Cell::new(0),
        }
    }
}

impl TimeSource for ScriptedClock {
    fn now(&self) -> Timestamp {
        let i = self.next.get();
        self.next.set(i + 1);
        Timestamp::new(self.times[i.min(self.times.len() - 1)])
    }
}

/// Stand-in for the platform adapter: applies scan actions and forwards events
struct FakeRadio<H: ScanEventHandler> {
    scan: ScanState,
    handler: H,
    starts: usize,
    stops: usize,
}

impl<H: ScanEventHandler> FakeRadio<H> {
    fn new(handler: H) -> Self {
        Self {
            scan: ScanState::new(),
            handler,
            starts: 0,
            stops: 0,
        }
    }

    fn state_change(&mut self, state: RadioState) {
        match self.scan.transition(state) {
            Some(ScanAction::Start) => {
                self.starts += 1;
                self.handler.on_ready();
            }
            Some(ScanAction::Stop) => {
                self.stops += 1;
                self.handler.on_unready(state);
            }
            None => {}
        }
    }

    fn discover(&mut self, event: &AdvertisementEvent) {
        if self.scan.is_scanning() {
            self.handler.on_advertisement(event).unwrap();
        }
    }
}

fn memory_recorder(times: &[u64]) -> CaptureRecorder<Vec<u8>, ScriptedClock> {
    let stream = LogStream::new(Vec::new(), false).expect("in-memory stream");
    CaptureRecorder::new(stream, ScriptedClock::new(times))
}

fn lines_of(recorder: CaptureRecorder<Vec<u8>, ScriptedClock>) -> Vec<String> {
    let sink = recorder.close().expect("close");
    String::from_utf8(sink)
        .expect("utf8")
        .lines()
        .map(str::to_string)
        .collect()
}

// ----------------------------------------------------------------------------
// Scenarios
// ----------------------------------------------------------------------------

#[test]
fn random_address_produces_expected_line() {
    let mut recorder = memory_recorder(&[1_700_000_000_000]);
    let event = AdvertisementEvent::new("AA:BB:CC:DD:EE:FF", AddressType::Random, -62);
    recorder.record(&event).unwrap();

    let lines = lines_of(recorder);
    assert_eq!(
        lines,
        vec![
            LOG_HEADER.to_string(),
            "1700000000000,261900fb1113aa4db748173e13abd88ae0faf7536891ee956fea94d58673cbdb,-62"
                .to_string(),
        ]
    );
}

#[test]
fn public_address_produces_no_line() {
    let mut recorder = memory_recorder(&[1_700_000_000_000]);
    let event = AdvertisementEvent::new("11:22:33:44:55:66", AddressType::Public, -40);
    assert!(recorder.record(&event).unwrap().is_none());

    assert_eq!(lines_of(recorder), vec![LOG_HEADER.to_string()]);
}

#[test]
fn unknown_address_type_produces_no_line() {
    let mut recorder = memory_recorder(&[1]);
    let event = AdvertisementEvent::new("11:22:33:44:55:66", AddressType::Unknown, -40);
    recorder.record(&event).unwrap();

    assert_eq!(lines_of(recorder), vec![LOG_HEADER.to_string()]);
}

#[test]
fn repeated_device_is_not_deduplicated() {
    let mut recorder = memory_recorder(&[1_000, 2_500]);
    let event = AdvertisementEvent::new("c4:7d:11:02:aa:90", AddressType::Random, -80);
    recorder.record(&event).unwrap();
    recorder.record(&event).unwrap();

    let lines = lines_of(recorder);
    assert_eq!(lines.len(), 3);

    let first: Vec<&str> = lines[1].split(',').collect();
    let second: Vec<&str> = lines[2].split(',').collect();
    assert_eq!(first[1], second[1]);
    assert_ne!(first[0], second[0]);
    assert_eq!(first[0], "1000");
    assert_eq!(second[0], "2500");
}

#[test]
fn power_cycle_resumes_scanning_without_second_header() {
    let recorder = memory_recorder(&[10, 20, 30]);
    let mut radio = FakeRadio::new(recorder);
    let event = AdvertisementEvent::new("de:ad:be:ef:00:01", AddressType::Random, -55);

    radio.state_change(RadioState::PoweredOn);
    assert!(radio.scan.is_scanning());
    radio.discover(&event);

    radio.state_change(RadioState::PoweredOff);
    assert!(!radio.scan.is_scanning());
    // Reports while off never reach the recorder
    radio.discover(&event);

    radio.state_change(RadioState::PoweredOn);
    assert!(radio.scan.is_scanning());
    radio.discover(&event);

    assert_eq!(radio.starts, 2);
    assert_eq!(radio.stops, 1);
    assert_eq!(radio.handler.stats().recorded, 2);

    let lines = lines_of(radio.handler);
    assert_eq!(lines.iter().filter(|l| *l == LOG_HEADER).count(), 1);
    assert_eq!(lines[0], LOG_HEADER);
    assert_eq!(lines.len(), 3);
}

#[test]
fn header_written_once_regardless_of_volume() {
    let times: Vec<u64> = (0..500).collect();
    let mut recorder = memory_recorder(&times);
    for i in 0..500u32 {
        let kind = if i % 3 == 0 {
            AddressType::Public
        } else {
            AddressType::Random
        };
        let event = AdvertisementEvent::new(format!("addr-{}", i), kind, -((i % 90) as i16));
        recorder.record(&event).unwrap();
    }
    let stats = recorder.stats();
    assert_eq!(stats.seen(), 500);

    let lines = lines_of(recorder);
    assert_eq!(lines[0], LOG_HEADER);
    assert_eq!(lines.iter().filter(|l| *l == LOG_HEADER).count(), 1);
    assert_eq!(lines.len() as u64, stats.recorded + 1);
}

#[test]
fn initialize_creates_named_file_with_header() {
    let dir = tempfile::tempdir().unwrap();
    let mut recorder =
        CaptureRecorder::initialize(dir.path(), FilenameScheme::Legacy, true).unwrap();

    let path = recorder.log_path().unwrap().to_path_buf();
    let name = path.file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("sniffer_"));
    assert!(name.ends_with(".log"));
    assert_eq!(path.parent().unwrap(), dir.path());

    let event = AdvertisementEvent::new("AA:BB:CC:DD:EE:FF", AddressType::Random, -62);
    recorder.record(&event).unwrap();
    recorder.close().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], LOG_HEADER);
    assert!(lines[1].ends_with(
        ",261900fb1113aa4db748173e13abd88ae0faf7536891ee956fea94d58673cbdb,-62"
    ));
}
