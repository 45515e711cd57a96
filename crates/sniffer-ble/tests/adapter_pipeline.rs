//! Adapter-to-recorder pipeline tests
//!
//! These run without radio hardware: btleplug values are built directly and
//! pushed through the same conversion the scan loop uses.

use btleplug::api::{AddressType as BtAddressType, BDAddr};
use sniffer_ble::convert::advertisement_from_parts;
use sniffer_ble::{BleScanner, BleScannerConfig, BleScannerError};
use sniffer_core::{
    CaptureRecorder, LogStream, ScanEventHandler, TimeSource, Timestamp, LOG_HEADER,
};

struct FixedClock;

impl TimeSource for FixedClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(1_700_000_000_000)
    }
}

#[test]
fn converted_reports_hash_lowercase_address() {
    let stream = LogStream::new(Vec::new(), false).unwrap();
    let mut recorder = CaptureRecorder::new(stream, FixedClock);

    let address = BDAddr::from([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    let event = advertisement_from_parts(address, Some(BtAddressType::Random), Some(-62)).unwrap();
    recorder.on_advertisement(&event).unwrap();

    let text = String::from_utf8(recorder.close().unwrap()).unwrap();
    assert_eq!(
        text,
        format!(
            "{}\n1700000000000,{},-62\n",
            LOG_HEADER, "c1582e87c802221899199e286ead9a7ed13eb3b5e3827be6cc149fb82a9e04f7"
        )
    );
}

#[test]
fn public_and_untyped_reports_are_filtered() {
    let stream = LogStream::new(Vec::new(), false).unwrap();
    let mut recorder = CaptureRecorder::new(stream, FixedClock);
    let address = BDAddr::from([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);

    for address_type in [Some(BtAddressType::Public), None] {
        let event = advertisement_from_parts(address, address_type, Some(-40)).unwrap();
        recorder.on_advertisement(&event).unwrap();
    }

    assert_eq!(recorder.stats().dropped_non_random, 2);
    let text = String::from_utf8(recorder.close().unwrap()).unwrap();
    assert_eq!(text, format!("{}\n", LOG_HEADER));
}

#[tokio::test]
async fn run_without_initialize_fails() {
    let stream = LogStream::new(Vec::new(), false).unwrap();
    let mut recorder = CaptureRecorder::new(stream, FixedClock);
    let mut scanner = BleScanner::new(BleScannerConfig::default());

    let err = scanner.run(&mut recorder, async {}).await.unwrap_err();
    assert!(matches!(err, BleScannerError::NotInitialized));
    assert!(!scanner.is_scanning());
}
